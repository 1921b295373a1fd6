use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

use image::{GrayImage, Luma};

// The same aperiodic pattern the unit tests stitch with.
fn scene(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        Luma([((3 * x * x + 7 * x + 5 * y * y + 11 * y + 13 * x * y) % 251) as u8])
    })
}

#[test]
fn stitches_a_directory_of_overlapping_strips() {
    let dir = tempfile::tempdir().unwrap();
    let source = scene(160, 60);
    for (index, x) in [0u32, 40, 80].iter().enumerate() {
        use image::GenericImageView;
        let strip = source.view(*x, 0, 80, 60).to_image();
        strip
            .save(dir.path().join(format!("{}.png", index)))
            .unwrap();
    }
    let output = dir.path().join("panorama.png");

    Command::cargo_bin("imgstitch")
        .unwrap()
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 images"));

    let panorama = image::open(&output).unwrap();
    use image::GenericImageView;
    assert_eq!(panorama.dimensions(), (160, 60));
}

#[test]
fn tiles_a_grid_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    for index in 0..4 {
        scene(8, 8)
            .save(dir.path().join(format!("{}.png", index)))
            .unwrap();
    }
    let output = dir.path().join("grid.png");

    Command::cargo_bin("imgstitch")
        .unwrap()
        .arg(dir.path())
        .arg("--grid")
        .arg("2x2")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    use image::GenericImageView;
    assert_eq!(image::open(&output).unwrap().dimensions(), (16, 16));
}

#[test]
fn missing_directory_fails_with_a_message() {
    Command::cargo_bin("imgstitch")
        .unwrap()
        .arg("/no/such/directory")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unparseable_color_fails_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    scene(8, 8).save(dir.path().join("0.png")).unwrap();

    Command::cargo_bin("imgstitch")
        .unwrap()
        .arg(dir.path())
        .arg("--color")
        .arg("red")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse color"));
}
