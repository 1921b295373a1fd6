// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Isolate a target color region from an image
//!
//! Range thresholding in either raw RGB space or HSV space.  Each
//! masking function takes a reference color and a structured
//! tolerance, and returns a binary mask the same size as the input:
//! 255 where every channel of the pixel falls inside the (inclusive)
//! bounds around the reference, 0 everywhere else.
//!
//! One parameterized tolerance type replaces the four-way overload
//! family found in most C-family codebases for this job, which keeps
//! the bound-clamping arithmetic in exactly one place.

use crate::color::{rgb_to_hsv, HUE_MAX};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// How far below and above the reference a channel may stray and
/// still be selected.  Both sides are inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tolerance {
    pub lower: i32,
    pub upper: i32,
}

impl Tolerance {
    /// The same slack on both sides.
    pub fn symmetric(tolerance: i32) -> Self {
        Tolerance {
            lower: tolerance,
            upper: tolerance,
        }
    }

    /// Different slack below and above.
    pub fn asymmetric(lower: i32, upper: i32) -> Self {
        Tolerance { lower, upper }
    }
}

/// Per-channel tolerances for HSV-space masking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HsvTolerance {
    pub hue: Tolerance,
    pub saturation: Tolerance,
    pub value: Tolerance,
}

impl HsvTolerance {
    /// The same slack on both sides of every channel.
    pub fn symmetric(hue: i32, saturation: i32, value: i32) -> Self {
        HsvTolerance {
            hue: Tolerance::symmetric(hue),
            saturation: Tolerance::symmetric(saturation),
            value: Tolerance::symmetric(value),
        }
    }

    /// Fully independent lower and upper slack per channel.
    pub fn asymmetric(
        lower_hue: i32,
        lower_saturation: i32,
        lower_value: i32,
        upper_hue: i32,
        upper_saturation: i32,
        upper_value: i32,
    ) -> Self {
        HsvTolerance {
            hue: Tolerance::asymmetric(lower_hue, upper_hue),
            saturation: Tolerance::asymmetric(lower_saturation, upper_saturation),
            value: Tolerance::asymmetric(lower_value, upper_value),
        }
    }
}

// Bounds live in i32 until the final clamp so that any tolerance,
// however large or even negative, lands back inside the channel
// range instead of wrapping.
fn bounds(channel: u8, tolerance: Tolerance, channel_max: u8) -> (u8, u8) {
    let channel_max = i32::from(channel_max);
    let lower = (i32::from(channel) - tolerance.lower).max(0).min(channel_max) as u8;
    let upper = (i32::from(channel) + tolerance.upper).max(0).min(channel_max) as u8;
    (lower, upper)
}

fn in_range(value: u8, (lower, upper): (u8, u8)) -> bool {
    lower <= value && value <= upper
}

/// Build a binary mask of the pixels within `tolerance` of `color` in
/// raw RGB space.  Bounds clamp to [0, 255] per channel.
pub fn mask_by_rgb(image: &RgbImage, color: Rgb<u8>, tolerance: Tolerance) -> GrayImage {
    let r_bounds = bounds(color[0], tolerance, 255);
    let g_bounds = bounds(color[1], tolerance, 255);
    let b_bounds = bounds(color[2], tolerance, 255);

    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let selected = in_range(pixel[0], r_bounds)
            && in_range(pixel[1], g_bounds)
            && in_range(pixel[2], b_bounds);
        mask.put_pixel(x, y, Luma([if selected { 255 } else { 0 }]));
    }
    mask
}

/// Build a binary mask of the pixels within `tolerance` of `color` in
/// HSV space.  The reference color and every image pixel go through
/// the one shared `rgb_to_hsv` routine.  Hue bounds clamp to
/// [0, 179] — they never wrap around the hue circle.
pub fn mask_by_hsv(image: &RgbImage, color: Rgb<u8>, tolerance: HsvTolerance) -> GrayImage {
    let target = rgb_to_hsv(color);
    let h_bounds = bounds(target.hue, tolerance.hue, HUE_MAX);
    let s_bounds = bounds(target.saturation, tolerance.saturation, 255);
    let v_bounds = bounds(target.value, tolerance.value, 255);

    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let hsv = rgb_to_hsv(*pixel);
        let selected = in_range(hsv.hue, h_bounds)
            && in_range(hsv.saturation, s_bounds)
            && in_range(hsv.value, v_bounds);
        mask.put_pixel(x, y, Luma([if selected { 255 } else { 0 }]));
    }
    mask
}
