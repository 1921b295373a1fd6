// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convert a color from RGB to HSV
//!
//! The single conversion routine shared by every path that needs HSV.
//! Both the scalar reference color and the per-pixel image sweep go
//! through `rgb_to_hsv`, so the two can never drift apart.  (Two
//! independently-written conversions that *almost* agree are a
//! classic source of off-by-one masking bugs.)

use image::Rgb;

/// A color in hue/saturation/value space, using the 8-bit-normalized
/// convention: hue is degrees/2 in [0, 179], saturation and value are
/// in [0, 255].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hsv {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

/// The upper bound of the 8-bit hue channel.  Hue is stored as
/// degrees/2, so it tops out at 179, not 255.
pub const HUE_MAX: u8 = 179;

/// Convert a single RGB color to HSV.
///
/// Value is the largest channel; saturation is the chroma relative to
/// the value; hue is the angle of the dominant channel sector, halved
/// to fit in a byte.  Achromatic colors (chroma zero) report hue and
/// saturation zero.
pub fn rgb_to_hsv(rgb: Rgb<u8>) -> Hsv {
    let r = f32::from(rgb[0]);
    let g = f32::from(rgb[1]);
    let b = f32::from(rgb[2]);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let value = max;

    let saturation = if max > 0.0 {
        255.0 * chroma / max
    } else {
        0.0
    };

    let mut hue = if chroma > 0.0 {
        if max == r {
            60.0 * (g - b) / chroma
        } else if max == g {
            120.0 + 60.0 * (b - r) / chroma
        } else {
            240.0 + 60.0 * (r - g) / chroma
        }
    } else {
        0.0
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // Hue is stored halved; 360° would otherwise round up to 180 and
    // escape the byte range.
    let mut hue = (hue / 2.0).round() as u16;
    if hue > u16::from(HUE_MAX) {
        hue = 0;
    }

    Hsv {
        hue: hue as u8,
        saturation: saturation.round() as u8,
        value: value.round() as u8,
    }
}
