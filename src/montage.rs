//! Tile equal-sized images into a uniform grid
//!
//! No registration here: the frames are assumed to already be laid
//! out row-major, and they are simply pasted side by side.  Useful
//! for contact sheets and for scenes captured on a fixed grid.

use image::{ImageBuffer, Pixel, Primitive};

/// Every way to arrange `count` images in a full rectangular grid,
/// as `(rows, columns)` pairs.  `grid_layouts(6)` yields
/// `[(6, 1), (3, 2), (2, 3), (1, 6)]`.
pub fn grid_layouts(count: usize) -> Vec<(usize, usize)> {
    (1..=count)
        .filter(|columns| count % columns == 0)
        .map(|columns| (count / columns, columns))
        .collect()
}

/// Paste `rows * columns` equal-sized images into one canvas,
/// row-major.  Mismatched counts or dimensions are caller bugs and
/// fail fast.
pub fn connect_images_grid<P, S>(
    images: &[ImageBuffer<P, Vec<S>>],
    rows: usize,
    columns: usize,
) -> ImageBuffer<P, Vec<S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    assert!(
        rows * columns == images.len(),
        "grid {}x{} does not hold {} images",
        rows,
        columns,
        images.len()
    );

    let (width, height) = images[0].dimensions();
    assert!(
        images.iter().all(|i| i.dimensions() == (width, height)),
        "grid tiling requires equal-sized images"
    );

    let mut canvas = ImageBuffer::new(width * columns as u32, height * rows as u32);
    for (index, image) in images.iter().enumerate() {
        let origin_x = (index % columns) as u32 * width;
        let origin_y = (index / columns) as u32 * height;
        for (x, y, pixel) in image.enumerate_pixels() {
            canvas.put_pixel(origin_x + x, origin_y + y, *pixel);
        }
    }
    canvas
}
