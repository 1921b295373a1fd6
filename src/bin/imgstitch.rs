use imgstitch::{
    connect_all_images, connect_images_grid, grid_layouts, io, mask_by_hsv, mask_by_rgb,
    HsvTolerance, Tolerance,
};
use std::path::Path;

extern crate clap;
extern crate image;

use clap::{App, Arg};
use failure::{ensure, format_err, Error};
use image::Rgb;

// "r,g,b" -> Rgb.  Channel values outside a byte are rejected here;
// tolerances, by contrast, clamp silently in the core.
fn parse_color(spec: &str) -> Result<Rgb<u8>, Error> {
    let channels: Vec<u8> = spec
        .split(',')
        .map(|part| part.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| format_err!("could not parse color {:?}, expected R,G,B", spec))?;
    ensure!(
        channels.len() == 3,
        "could not parse color {:?}, expected R,G,B",
        spec
    );
    Ok(Rgb([channels[0], channels[1], channels[2]]))
}

// "h,s,v" -> per-channel symmetric tolerances.
fn parse_hsv_tolerance(spec: &str) -> Result<HsvTolerance, Error> {
    let parts: Vec<i32> = spec
        .split(',')
        .map(|part| part.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| format_err!("could not parse tolerance {:?}, expected H,S,V", spec))?;
    ensure!(
        parts.len() == 3,
        "could not parse tolerance {:?}, expected H,S,V",
        spec
    );
    Ok(HsvTolerance::symmetric(parts[0], parts[1], parts[2]))
}

// "RxC" -> (rows, columns).
fn parse_grid(spec: &str) -> Result<(usize, usize), Error> {
    let parts: Vec<usize> = spec
        .split('x')
        .map(|part| part.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| format_err!("could not parse grid {:?}, expected RxC", spec))?;
    ensure!(
        parts.len() == 2,
        "could not parse grid {:?}, expected RxC",
        spec
    );
    Ok((parts[0], parts[1]))
}

fn main() -> Result<(), Error> {
    let matches = App::new("imgstitch")
        .version("0.1.0")
        .about("Stitch a directory of overlapping images into one canvas")
        .arg(
            Arg::with_name("dir")
                .help("Directory of images, stitched in lexical filename order")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .help("Output file")
                .takes_value(true)
                .default_value("output.png"),
        )
        .arg(
            Arg::with_name("color")
                .long("color")
                .help("Mask each frame to this R,G,B color before stitching")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("tolerance")
                .long("tolerance")
                .help("Symmetric per-channel tolerance for --color, in RGB space")
                .takes_value(true)
                .default_value("15"),
        )
        .arg(
            Arg::with_name("hsv-tolerance")
                .long("hsv-tolerance")
                .help("Mask in HSV space instead, with H,S,V tolerances")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("grid")
                .long("grid")
                .help("Tile the frames in a RxC grid instead of stitching")
                .takes_value(true),
        )
        .get_matches();

    let directory = Path::new(matches.value_of("dir").unwrap());
    let output = matches.value_of("output").unwrap();

    let images = io::load_images(directory)?;
    println!("Loaded {} images from {:?}", images.len(), directory);
    ensure!(!images.is_empty(), "directory {:?} holds no images", directory);

    if let Some(grid) = matches.value_of("grid") {
        let (rows, columns) = parse_grid(grid)?;
        ensure!(
            rows * columns == images.len(),
            "grid {}x{} does not hold {} images; possible layouts: {:?}",
            rows,
            columns,
            images.len(),
            grid_layouts(images.len())
        );
        let canvas = connect_images_grid(&images, rows, columns);
        canvas
            .save(output)
            .map_err(|e| format_err!("could not save {:?}: {}", output, e))?;
        println!("Wrote {}x{} grid to {}", rows, columns, output);
        return Ok(());
    }

    if let Some(color) = matches.value_of("color") {
        let color = parse_color(color)?;
        let masks: Vec<_> = if let Some(spec) = matches.value_of("hsv-tolerance") {
            let tolerance = parse_hsv_tolerance(spec)?;
            images.iter().map(|i| mask_by_hsv(i, color, tolerance)).collect()
        } else {
            let tolerance = Tolerance::symmetric(
                matches
                    .value_of("tolerance")
                    .unwrap()
                    .parse()
                    .map_err(|_| format_err!("tolerance must be an integer"))?,
            );
            images.iter().map(|i| mask_by_rgb(i, color, tolerance)).collect()
        };

        println!("Masked to color {:?}, stitching...", color);
        let canvas = connect_all_images(&masks);
        canvas
            .save(output)
            .map_err(|e| format_err!("could not save {:?}: {}", output, e))?;
        println!("Wrote {}x{} canvas to {}", canvas.width(), canvas.height(), output);
        return Ok(());
    }

    println!("Stitching...");
    let canvas = connect_all_images(&images);
    canvas
        .save(output)
        .map_err(|e| format_err!("could not save {:?}: {}", output, e))?;
    println!("Wrote {}x{} canvas to {}", canvas.width(), canvas.height(), output);
    Ok(())
}
