// #![deny(missing_docs)]

extern crate image;

mod ternary;

pub mod color;
pub use color::{rgb_to_hsv, Hsv};

pub mod mask;
pub use mask::{mask_by_hsv, mask_by_rgb, HsvTolerance, Tolerance};

pub mod scoremap;
pub use scoremap::ScoreMap;

pub mod matcher;
pub use matcher::match_template;

pub mod stitcher;
pub use stitcher::{connect_all_images, connect_two_images, find_offset, Offset};

pub mod montage;
pub use montage::{connect_images_grid, grid_layouts};

pub mod io;
