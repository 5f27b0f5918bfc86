use image::{GrayImage, Luma, Rgb};
use proptest::prelude::*;
use vidinspect_common::clock::FixedClock;
use vidinspect_media::{MemoryVideo, RawFrame};
use vidinspect_model::config::AnalysisConfig;
use vidinspect_model::zone::Zone;
use vidinspect_motion::{motion_score, run_inspection, sample_indices, sample_stride};

const SIDE: u32 = 100;

fn gray_from(seed: u64) -> GrayImage {
    let mut state = seed | 1;
    GrayImage::from_fn(SIDE, SIDE, |_, _| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        Luma([(state & 0xff) as u8])
    })
}

fn rgb_from(seed: u64, still: bool) -> RawFrame {
    if still {
        return RawFrame::from_pixel(SIDE, SIDE, Rgb([80, 80, 80]));
    }
    let gray = gray_from(seed);
    RawFrame::from_fn(SIDE, SIDE, |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

proptest! {
    #[test]
    fn indices_start_at_zero_and_step_evenly(frame_count in 0u64..5_000, fps in 0.1f64..120.0) {
        let stride = sample_stride(fps).unwrap();
        let indices: Vec<u64> = sample_indices(frame_count, fps).unwrap().collect();

        prop_assert!(stride >= 1);
        prop_assert_eq!(indices.len() as u64, frame_count.div_ceil(stride));
        if let Some(&first) = indices.first() {
            prop_assert_eq!(first, 0);
        }
        prop_assert!(indices.iter().all(|&i| i < frame_count));
        prop_assert!(indices.windows(2).all(|w| w[1] - w[0] == stride));
    }

    #[test]
    fn motion_score_is_symmetric_and_bounded(a in any::<u64>(), b in any::<u64>()) {
        let (pa, pb) = (gray_from(a), gray_from(b));
        let forward = motion_score(&pa, &pb, None).unwrap();

        prop_assert_eq!(forward, motion_score(&pb, &pa, None).unwrap());
        prop_assert!(forward <= u64::from(SIDE * SIDE));
        prop_assert_eq!(motion_score(&pa, &pa, None).unwrap(), 0);
    }

    #[test]
    fn zone_score_never_exceeds_full_frame(
        a in any::<u64>(),
        b in any::<u64>(),
        x1 in 0u32..20,
        y1 in 0u32..20,
        w in 1u32..20,
        h in 1u32..20,
    ) {
        let (pa, pb) = (gray_from(a), gray_from(b));
        let zone = Zone::new(x1, y1, x1 + w, y1 + h).unwrap();

        let zoned = motion_score(&pa, &pb, Some(&zone)).unwrap();
        prop_assert!(zoned <= motion_score(&pa, &pb, None).unwrap());
        prop_assert!(zoned <= zone.area());
    }

    #[test]
    fn events_match_stalled_timeline_entries(
        pattern in proptest::collection::vec(any::<bool>(), 1..12),
        seed in any::<u64>(),
        threshold in 10u32..=100,
    ) {
        let frames: Vec<RawFrame> = pattern
            .iter()
            .enumerate()
            .map(|(i, &still)| rgb_from(seed.wrapping_add(i as u64), still))
            .collect();
        let count = frames.len();
        let video = MemoryVideo::new(SIDE, SIDE, 1.0, frames);
        let config = AnalysisConfig {
            movement_threshold: threshold,
            ..AnalysisConfig::default()
        };
        let clock = FixedClock::from_hms_micro(12, 0, 0, 0).unwrap();

        let report = run_inspection(video, &config, &clock).unwrap().into_result().unwrap();

        prop_assert_eq!(report.sampled_frames, count);
        prop_assert_eq!(report.timeline.len(), count - 1);

        let stalled: Vec<u64> = report
            .timeline
            .entries()
            .iter()
            .filter(|e| config.is_stall(e.score))
            .map(|e| e.frame_index)
            .collect();
        let logged: Vec<u64> = report.events.iter().map(|e| e.frame_index).collect();
        prop_assert_eq!(logged, stalled);
        prop_assert_eq!(report.event_descriptions.len(), report.events.len());
    }
}

#[test]
fn frame_size_admits_both_sides_of_stall_limit() {
    let frames = vec![
        rgb_from(1, false),
        rgb_from(2, false),
        rgb_from(3, true),
        rgb_from(4, true),
    ];
    let video = MemoryVideo::new(SIDE, SIDE, 1.0, frames);
    let clock = FixedClock::from_hms_micro(12, 0, 0, 0).unwrap();
    let config = AnalysisConfig {
        movement_threshold: 50,
        ..AnalysisConfig::default()
    };

    let report = run_inspection(video, &config, &clock).unwrap().report;

    let stalled: Vec<bool> = report.timeline.scores().map(|s| config.is_stall(s)).collect();
    assert_eq!(stalled, vec![false, false, true]);
    assert_eq!(report.events.len(), 1);
}
