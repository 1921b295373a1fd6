use criterion::{criterion_group, criterion_main, Criterion};
use image::{GenericImageView, GrayImage, Luma};
use imgstitch::match_template;

fn bench_match_template(c: &mut Criterion) {
    let image = GrayImage::from_fn(320, 120, |x, y| {
        Luma([((3 * x * x + 7 * x + 5 * y * y + 11 * y + 13 * x * y) % 251) as u8])
    });
    let template = image.view(200, 30, 40, 60).to_image();

    c.bench_function("match_template 320x120 / 40x60", move |b| {
        b.iter(|| match_template(&image, &template))
    });
}

criterion_group!(benches, bench_match_template);
criterion_main!(benches);
