// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Normalized cross-correlation template matching
//!
//! Slide a template over every position of a search image and score
//! each window with the zero-mean normalized cross-correlation, which
//! is invariant to uniform brightness and contrast changes.  Scores
//! land in [-1, 1]; 1 is a perfect match.
//!
//! Matching happens on the luma channel, so color and single-channel
//! mask images go through the same code path.

use crate::cq;
use crate::scoremap::ScoreMap;
use image::{GenericImageView, Pixel, Primitive};
use num_traits::NumCast;

// (Pixel) -> luma as f32.  One number per pixel, whatever the source
// pixel format was.
#[inline]
fn lumachannel<P, S>(p: &P) -> f32
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let c = p.to_luma().channels().to_owned();
    NumCast::from(c[0]).unwrap()
}

// Flatten an image view into a row-major luma plane.
fn luma_plane<I, P, S>(image: &I) -> Vec<f32>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut plane = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            plane.push(lumachannel(&image.get_pixel(x, y)));
        }
    }
    plane
}

/// Score every placement of `template` inside `image` with zero-mean
/// normalized cross-correlation.  The result has
/// `(image.width - template.width + 1, image.height - template.height + 1)`
/// entries, one per candidate top-left corner.
///
/// A window (or template) with zero variance cannot be normalized and
/// scores 0 rather than NaN.
///
/// The template must be non-empty and fit inside the image; violating
/// that is a caller bug and fails fast.
pub fn match_template<I, J, P, S>(image: &I, template: &J) -> ScoreMap
where
    I: GenericImageView<Pixel = P>,
    J: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (iw, ih) = image.dimensions();
    let (tw, th) = template.dimensions();
    assert!(tw > 0 && th > 0, "template cannot be empty");
    assert!(
        iw >= tw && ih >= th,
        "template ({}x{}) must fit inside the search image ({}x{})",
        tw,
        th,
        iw,
        ih
    );

    let image_plane = luma_plane(image);
    let template_plane = luma_plane(template);

    // Accumulate in f64: the sums below run over thousands of terms
    // and the coefficient is a small difference of large products.
    let n = (tw as usize * th as usize) as f64;
    let t_sum: f64 = template_plane.iter().map(|&t| <f64 as From<f32>>::from(t)).sum();
    let t_mean = t_sum / n;
    let t_var_sum: f64 = template_plane
        .iter()
        .map(|&t| {
            let d = <f64 as From<f32>>::from(t) - t_mean;
            d * d
        })
        .sum();

    let out_w = iw - tw + 1;
    let out_h = ih - th + 1;
    let mut scores = ScoreMap::new(out_w, out_h);

    let iw = iw as usize;
    let (tw, th) = (tw as usize, th as usize);

    for y in 0..out_h as usize {
        for x in 0..out_w as usize {
            let mut sum_i = 0.0f64;
            let mut sum_i_sq = 0.0f64;
            let mut cross = 0.0f64;

            for j in 0..th {
                let row = &image_plane[(y + j) * iw + x..(y + j) * iw + x + tw];
                let trow = &template_plane[j * tw..(j + 1) * tw];
                for (&iv, &tv) in row.iter().zip(trow) {
                    let (iv, tv) = (<f64 as From<f32>>::from(iv), <f64 as From<f32>>::from(tv));
                    sum_i += iv;
                    sum_i_sq += iv * iv;
                    cross += iv * tv;
                }
            }

            let i_mean = sum_i / n;
            // sum((I - meanI) * (T - meanT)) = <I,T> - N*meanI*meanT
            let coeff = cross - n * i_mean * t_mean;
            let i_var_sum = sum_i_sq - n * i_mean * i_mean;
            let denom = (i_var_sum * t_var_sum).sqrt();

            scores[(x as u32, y as u32)] = cq!(denom > 1e-12, (coeff / denom) as f32, 0.0);
        }
    }

    scores
}
