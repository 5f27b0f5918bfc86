//! Activity classification and recommendation text.

use vidinspect_model::config::{AnalysisConfig, AnalysisTemplate};
use vidinspect_model::event::EventLog;
use vidinspect_model::report::{ActivityLevel, Recommendation, Summary};
use vidinspect_model::timeline::Timeline;

/// Mean scores below this are low activity.
pub const LOW_ACTIVITY_LIMIT: f64 = 1000.0;

/// Mean scores above this are high activity.
pub const HIGH_ACTIVITY_LIMIT: f64 = 5000.0;

/// Band a mean motion score. Both limits are exclusive.
pub fn classify_activity(avg: f64) -> ActivityLevel {
    if avg < LOW_ACTIVITY_LIMIT {
        ActivityLevel::Low
    } else if avg > HIGH_ACTIVITY_LIMIT {
        ActivityLevel::High
    } else {
        ActivityLevel::Balanced
    }
}

pub fn activity_message(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Low => {
            "Overall activity in the video is low. The process may need automation or faster stages."
        }
        ActivityLevel::High => {
            "High activity detected. Check for chaotic operations or operator overload."
        }
        ActivityLevel::Balanced => {
            "The process looks balanced. No obvious activity deviations."
        }
    }
}

pub fn template_advice(template: AnalysisTemplate) -> String {
    format!(
        "Use the '{}' template for further analysis. Check bottlenecks and compliance with standards.",
        template.label()
    )
}

/// Build the report summary for a finished (or stopped) run.
pub fn summarize(timeline: &Timeline, log: &EventLog, config: &AnalysisConfig) -> Summary {
    if !log.is_empty() {
        let advice = template_advice(config.template);
        let recommendations = log
            .iter()
            .map(|(event, description)| Recommendation {
                frame_index: event.frame_index,
                description: description.to_string(),
                advice: advice.clone(),
            })
            .collect();
        return Summary::EventDriven { recommendations };
    }

    if config.full_analysis {
        let average_score = timeline.mean_score();
        let level = classify_activity(average_score);
        return Summary::ActivityOverview {
            average_score,
            level,
            message: activity_message(level).to_string(),
        };
    }

    Summary::NoEvents
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidinspect_model::event::Event;

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify_activity(500.0), ActivityLevel::Low);
        assert_eq!(classify_activity(3000.0), ActivityLevel::Balanced);
        assert_eq!(classify_activity(6000.0), ActivityLevel::High);
    }

    #[test]
    fn test_classify_boundaries_are_balanced() {
        assert_eq!(classify_activity(1000.0), ActivityLevel::Balanced);
        assert_eq!(classify_activity(5000.0), ActivityLevel::Balanced);
        assert_eq!(classify_activity(999.999), ActivityLevel::Low);
        assert_eq!(classify_activity(5000.001), ActivityLevel::High);
        assert_eq!(classify_activity(0.0), ActivityLevel::Low);
    }

    #[test]
    fn test_events_take_priority_over_overview() {
        let mut log = EventLog::new();
        log.record(Event::movement_stall("t", 30));
        log.record(Event::movement_stall("t", 90));
        let config = AnalysisConfig {
            full_analysis: true,
            template: AnalysisTemplate::StopControl,
            ..AnalysisConfig::default()
        };

        match summarize(&Timeline::new(), &log, &config) {
            Summary::EventDriven { recommendations } => {
                assert_eq!(recommendations.len(), 2);
                assert_eq!(recommendations[1].frame_index, 90);
                assert!(recommendations[0].advice.contains("'Stop control'"));
                assert_eq!(recommendations[0].description, log.descriptions()[0]);
            }
            other => panic!("expected event-driven summary, got {other:?}"),
        }
    }

    #[test]
    fn test_overview_uses_mean_score() {
        let mut timeline = Timeline::new();
        timeline.push(30, 6000);
        timeline.push(60, 8000);
        let config = AnalysisConfig {
            full_analysis: true,
            ..AnalysisConfig::default()
        };

        let summary = summarize(&timeline, &EventLog::new(), &config);
        match summary {
            Summary::ActivityOverview {
                average_score,
                level,
                ref message,
            } => {
                assert!((average_score - 7000.0).abs() < 1e-9);
                assert_eq!(level, ActivityLevel::High);
                assert_eq!(message, activity_message(ActivityLevel::High));
            }
            other => panic!("expected overview, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_timeline_overview_is_low() {
        let config = AnalysisConfig {
            full_analysis: true,
            ..AnalysisConfig::default()
        };
        let summary = summarize(&Timeline::new(), &EventLog::new(), &config);
        assert_eq!(summary.activity_level(), Some(ActivityLevel::Low));
    }

    #[test]
    fn test_no_events_without_full_analysis() {
        let summary = summarize(&Timeline::new(), &EventLog::new(), &AnalysisConfig::default());
        assert_eq!(summary, Summary::NoEvents);
    }
}
