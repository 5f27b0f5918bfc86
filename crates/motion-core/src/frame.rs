//! Frame conversions, the zone overlay, and the stall badge.

use image::{GrayImage, Luma, Rgb};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use vidinspect_media::RawFrame;
use vidinspect_model::zone::Zone;

/// Stroke color of the zone rectangle.
pub const OVERLAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Stroke width of the zone rectangle, in pixels.
pub const OVERLAY_THICKNESS: u32 = 2;

/// Fill color of the stall marker.
pub const STALL_MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Top-left corner and size of the stall marker badge.
pub const STALL_MARKER_ORIGIN: (i32, i32) = (10, 10);
pub const STALL_MARKER_SIZE: (u32, u32) = (48, 16);

// BT.601 luma weights in 14-bit fixed point, rounded half up.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// BT.601 luma of an RGB pixel: `0.299 R + 0.587 G + 0.114 B`.
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Luma conversion used for differencing.
pub fn to_gray(frame: &RawFrame) -> GrayImage {
    let (width, height) = frame.dimensions();
    GrayImage::from_fn(width, height, |x, y| Luma([luma(frame.get_pixel(x, y))]))
}

/// Draw the zone outline onto `frame`, stroking inward from the zone edge.
pub fn draw_zone_overlay(frame: &mut RawFrame, zone: &Zone) {
    for inset in 0..OVERLAY_THICKNESS {
        let width = zone.width().saturating_sub(2 * inset);
        let height = zone.height().saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((zone.x1() + inset) as i32, (zone.y1() + inset) as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(frame, rect, OVERLAY_COLOR);
    }
}

/// Stamp the stall badge near the top-left corner of `frame`, clipped to its bounds.
pub fn draw_stall_marker(frame: &mut RawFrame) {
    let (x, y) = STALL_MARKER_ORIGIN;
    let (width, height) = STALL_MARKER_SIZE;
    draw_filled_rect_mut(frame, Rect::at(x, y).of_size(width, height), STALL_MARKER_COLOR);
}
