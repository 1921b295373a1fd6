//! Load and save image directories
//!
//! The stitching core never touches the filesystem; everything here
//! is boundary glue.  Loading returns frames in lexical filename
//! order, which is the ordering contract `connect_all_images` relies
//! on — name your captures `000.png`, `001.png`, … and the chain
//! folds left to right.

use failure::{ensure, format_err, Error};
use image::{GrayImage, RgbImage};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// Load every file in `directory` as an RGB image, in lexical
/// filename order.  A missing directory or an unreadable file is
/// reported, not swallowed.
pub fn load_images(directory: &Path) -> Result<Vec<RgbImage>, Error> {
    ensure!(
        directory.is_dir(),
        "input directory {:?} not found",
        directory
    );

    let paths: Vec<PathBuf> = std::fs::read_dir(directory)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .sorted()
        .collect();

    paths
        .iter()
        .map(|path| {
            let image = image::open(path)
                .map_err(|e| format_err!("could not load image {:?}: {}", path, e))?;
            Ok(image.to_rgb8())
        })
        .collect()
}

fn target_path(directory: &Path, name: &str) -> Result<PathBuf, Error> {
    ensure!(
        directory.is_dir(),
        "output directory {:?} not found",
        directory
    );
    Ok(directory.join(format!("{}.png", name)))
}

/// Write a color image to `<directory>/<name>.png`.
pub fn save_image(directory: &Path, name: &str, image: &RgbImage) -> Result<(), Error> {
    let path = target_path(directory, name)?;
    image
        .save(&path)
        .map_err(|e| format_err!("could not save image {:?}: {}", path, e))
}

/// Write a single-channel mask to `<directory>/<name>.png`.
pub fn save_mask(directory: &Path, name: &str, mask: &GrayImage) -> Result<(), Error> {
    let path = target_path(directory, name)?;
    mask.save(&path)
        .map_err(|e| format_err!("could not save mask {:?}: {}", path, e))
}

/// Write a whole sequence as `0.png`, `1.png`, … in order.
pub fn save_images(directory: &Path, images: &[RgbImage]) -> Result<(), Error> {
    for (index, image) in images.iter().enumerate() {
        save_image(directory, &index.to_string(), image)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn marker(value: u8) -> RgbImage {
        RgbImage::from_pixel(4, 4, Rgb([value, 0, 0]))
    }

    #[test]
    fn loading_respects_lexical_filename_order() {
        let dir = tempfile::tempdir().unwrap();
        // Written out of order on purpose.
        save_image(dir.path(), "b", &marker(2)).unwrap();
        save_image(dir.path(), "c", &marker(3)).unwrap();
        save_image(dir.path(), "a", &marker(1)).unwrap();

        let images = load_images(dir.path()).unwrap();
        let markers: Vec<u8> = images.iter().map(|i| i.get_pixel(0, 0)[0]).collect();
        assert_eq!(markers, vec![1, 2, 3]);
    }

    #[test]
    fn sequences_save_numbered() {
        let dir = tempfile::tempdir().unwrap();
        save_images(dir.path(), &[marker(9), marker(8)]).unwrap();

        assert!(dir.path().join("0.png").is_file());
        assert!(dir.path().join("1.png").is_file());

        let reloaded = load_images(dir.path()).unwrap();
        assert_eq!(reloaded[0].get_pixel(0, 0)[0], 9);
        assert_eq!(reloaded[1].get_pixel(0, 0)[0], 8);
    }

    #[test]
    fn missing_directory_reports_an_error() {
        let missing = Path::new("/definitely/not/here");
        assert!(load_images(missing).is_err());
        assert!(save_image(missing, "x", &marker(0)).is_err());
    }
}
