// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stitch overlapping images into one canvas
//!
//! The right image donates a narrow vertical strip from its left
//! edge; template matching locates that strip inside the left image,
//! and the discovered offset decides where the right image lands on a
//! freshly allocated canvas.  `connect_all_images` folds a whole
//! chain left-to-right, growing the composite one frame at a time.
//!
//! Known weakness, carried deliberately: the best correlation score
//! is accepted unconditionally.  Two images with no real overlap
//! still stitch — at whatever offset happened to score highest.
//!
//! Precondition for the chain fold: every input shares one height and
//! the capture pattern is left-to-right, top-aligned.  The fixed
//! search window is relative to each incoming right image, so it
//! stays stable no matter how wide the composite grows.

use crate::matcher::match_template;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use std::cmp::{max, min};

/// The width of the strip `connect_two_images` cuts from the left
/// edge of the right image to search for in the left image.
const SEARCH_STRIP_WIDTH: u32 = 40;

/// The displacement at which a template best matched: the top-left
/// corner of the winning window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Offset {
    pub x: u32,
    pub y: u32,
}

/// Cut the `(search_x, search_y, search_width, search_height)`
/// rectangle out of `right` and find where it best matches inside
/// `left`.  The rectangle must lie inside `right` and fit inside
/// `left`; those are caller contracts and fail fast.
pub fn find_offset<I, J, P, S>(
    left: &I,
    right: &J,
    search_x: u32,
    search_y: u32,
    search_width: u32,
    search_height: u32,
) -> Offset
where
    I: GenericImageView<Pixel = P>,
    J: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let template = right.view(search_x, search_y, search_width, search_height);
    let (x, y, _score) = match_template(left, &*template).peak();
    Offset { x, y }
}

// Copy a whole source image onto the canvas at an offset.  Whatever
// was under it loses.
fn blit<P, S>(
    canvas: &mut ImageBuffer<P, Vec<S>>,
    source: &ImageBuffer<P, Vec<S>>,
    offset_x: u32,
    offset_y: u32,
) where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    for (x, y, pixel) in source.enumerate_pixels() {
        canvas.put_pixel(offset_x + x, offset_y + y, *pixel);
    }
}

/// Composite `right` onto `left`, discovering the overlap by matching
/// a 40-pixel-wide strip from the left edge of `right` (vertically,
/// the middle half of the image).  Every pixel of both inputs lands
/// on the canvas; where they overlap, `right` wins because it is
/// copied second.  Uncovered canvas stays black.
pub fn connect_two_images<P, S>(
    left: &ImageBuffer<P, Vec<S>>,
    right: &ImageBuffer<P, Vec<S>>,
) -> ImageBuffer<P, Vec<S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let strip_y = right.height() / 4;
    let strip_height = right.height() / 2;
    let matched = find_offset(left, right, 0, strip_y, SEARCH_STRIP_WIDTH, strip_height);

    // Vertical displacement of right relative to left.  Negative
    // means right sits higher than left.
    let diff_y = i64::from(matched.y) - i64::from(strip_y);

    let min_y = min(0, diff_y);
    let max_y = max(i64::from(left.height()), diff_y + i64::from(right.height()));

    let width = matched.x + right.width();
    let height = (max_y - min_y) as u32;

    // ImageBuffer::new zero-fills, which is the black background.
    let mut canvas = ImageBuffer::new(width, height);
    blit(&mut canvas, left, 0, (-min_y) as u32);
    blit(&mut canvas, right, matched.x, (diff_y - min_y) as u32);
    canvas
}

/// Fold a non-empty chain of images left-to-right: the growing
/// composite is the left operand of every step.  An empty chain is a
/// caller bug and fails fast.
pub fn connect_all_images<P, S>(images: &[ImageBuffer<P, Vec<S>>]) -> ImageBuffer<P, Vec<S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    assert!(!images.is_empty(), "cannot connect an empty image chain");

    let mut composite = images[0].clone();
    for right in &images[1..] {
        composite = connect_two_images(&composite, right);
    }
    composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    // A deterministic pattern, quadratic in x and y so it has no
    // translational period: every window is unique and the
    // correlation peak is unambiguous.
    fn noise(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((3 * x * x + 7 * x + 5 * y * y + 11 * y + 13 * x * y) % 251) as u8])
        })
    }

    #[test]
    fn find_offset_recovers_a_known_displacement() {
        let left = noise(100, 80);
        // Right is the slice of the scene starting 30 pixels in, so
        // its left-edge strip appears in left at x=30.
        let right = left.view(30, 0, 70, 80).to_image();

        let offset = find_offset(&left, &right, 0, 20, 40, 40);
        assert_eq!(offset, Offset { x: 30, y: 20 });
    }

    #[test]
    fn connect_two_reports_the_spec_dimensions() {
        let left = noise(100, 80);
        let right = left.view(60, 0, 40, 80).to_image();

        let canvas = connect_two_images(&left, &right);
        // match.x = 60, diff_y = 0: width = 60 + 40, height = 80.
        assert_eq!(canvas.dimensions(), (100, 80));
        // Perfect overlap means the composite reproduces the scene.
        assert_eq!(canvas.as_raw(), left.as_raw());
    }

    #[test]
    fn right_image_higher_than_left_grows_the_canvas_upward() {
        let left = noise(100, 80);
        // Build a right image whose search strip (rows 20..60 of
        // columns 0..40) replicates rows 10..50 of columns 50..90 in
        // left; everything else is a different pattern.
        let right = GrayImage::from_fn(60, 80, |x, y| {
            if x < 40 && (20..60).contains(&y) {
                *left.get_pixel(50 + x, y - 10)
            } else {
                Luma([((x * 31 + y * 17) % 200) as u8])
            }
        });

        let canvas = connect_two_images(&left, &right);
        // match = (50, 10), diff_y = -10: width = 50 + 60 = 110,
        // height = max(80, 70) - (-10) = 90.
        assert_eq!(canvas.dimensions(), (110, 90));
        // Left shifts down by 10, right sits at the top.
        assert_eq!(canvas.get_pixel(0, 10), left.get_pixel(0, 0));
        assert_eq!(canvas.get_pixel(50, 0), right.get_pixel(0, 0));
        // Uncovered corner stays black.
        assert_eq!(canvas.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn overlap_resolves_last_write_wins() {
        let left = noise(100, 80);
        let right = GrayImage::from_fn(60, 80, |x, y| {
            if x < 40 && (20..60).contains(&y) {
                *left.get_pixel(50 + x, y)
            } else {
                // Deliberately different from the scene under it.
                Luma([255])
            }
        });

        let canvas = connect_two_images(&left, &right);
        // Right lands at (50, 0).  A pixel outside its matched strip
        // overwrites whatever left put there.
        assert_eq!(canvas.get_pixel(50 + 45, 30), &Luma([255]));
    }

    #[test]
    fn three_strip_chain_reconstructs_the_source() {
        let source = noise(160, 60);
        // Three 80-wide strips, each overlapping its neighbor by 40.
        let strips: Vec<GrayImage> = [0u32, 40, 80]
            .iter()
            .map(|&x| source.view(x, 0, 80, 60).to_image())
            .collect();

        let canvas = connect_all_images(&strips);
        assert_eq!(canvas.dimensions(), (160, 60));
        assert_eq!(canvas.as_raw(), source.as_raw());
    }

    #[test]
    fn uncorrelated_images_still_produce_an_offset() {
        // No true overlap anywhere: the best score is accepted
        // unconditionally, so this must return within bounds rather
        // than fail.
        let left = noise(100, 80);
        let right = GrayImage::from_fn(60, 80, |x, y| Luma([((x * 13 + y * 7) % 97) as u8]));

        let offset = find_offset(&left, &right, 0, 20, 40, 40);
        assert!(offset.x <= 100 - 40);
        assert!(offset.y <= 80 - 40);

        let canvas = connect_two_images(&left, &right);
        assert_eq!(canvas.width(), offset.x + 60);
    }

    #[test]
    #[should_panic(expected = "empty image chain")]
    fn empty_chain_is_a_contract_violation() {
        let images: Vec<GrayImage> = Vec::new();
        connect_all_images(&images);
    }

    #[test]
    fn single_image_chain_is_the_image_itself() {
        let only = noise(30, 20);
        let canvas = connect_all_images(&[only.clone()]);
        assert_eq!(canvas.as_raw(), only.as_raw());
    }
}
