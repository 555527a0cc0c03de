//! End-to-end tests through the public library API with the real `image`
//! backend: discover, generate, encode, and read the result back.

use backgrounder::aspect::{AspectRatioResolver, Orientation};
use backgrounder::imaging::{
    BLACK, BackgroundKind, BackgroundRequest, Fill, ImageBackend, Quality, RustBackend,
    generate_from_path,
};
use backgrounder::process::{BatchSettings, SaveTarget, process_batch, write_report};
use backgrounder::scan::discover_inputs;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_photo(path: &Path, width: u32, height: u32, color: Rgb<u8>) {
    RgbImage::from_pixel(width, height, color).save(path).unwrap();
}

fn request(expr: &str, kind: BackgroundKind) -> BackgroundRequest {
    BackgroundRequest::new(AspectRatioResolver::new(Orientation::Vertical).resolve(expr), kind)
}

#[test]
fn directory_batch_saves_padded_jpegs() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("shoot");
    let out = tmp.path().join("output");
    fs::create_dir_all(&input).unwrap();
    write_photo(&input.join("001-tall.jpg"), 100, 200, Rgb([200, 40, 40]));
    write_photo(&input.join("002-square.png"), 80, 80, Rgb([40, 40, 200]));
    fs::write(input.join("notes.txt"), "not a photo").unwrap();

    let inputs = discover_inputs(&input).unwrap();
    assert_eq!(inputs.len(), 2);

    let settings = BatchSettings {
        request: request("4/5", BackgroundKind::Black),
        save: Some(SaveTarget {
            dir: out.clone(),
            quality: Quality::default(),
        }),
    };
    let summary = process_batch(&RustBackend::new(), &inputs, &settings, None).unwrap();
    assert!(summary.is_success());

    let tall = &summary.generated[0];
    let saved = tall.output.as_ref().unwrap();
    assert_eq!(saved.extension().unwrap(), "jpg");
    let decoded = image::open(saved).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (160, 200));
    // Margins are black; JPEG keeps flat regions within a small tolerance.
    let corner = decoded.get_pixel(2, 2);
    assert!(corner.0.iter().all(|&c| c < 16), "corner {corner:?}");
    let centre = decoded.get_pixel(80, 100);
    assert!(centre[0] > 150 && centre[2] < 100, "centre {centre:?}");

    // 80x80 at 0.8 wants 64px: clamped, saved losslessly as PNG.
    let square = &summary.generated[1];
    assert!(square.clamped);
    let png = image::open(square.output.as_ref().unwrap()).unwrap().to_rgb8();
    assert_eq!(png, RgbImage::from_pixel(80, 80, Rgb([40, 40, 200])));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn corrupt_input_is_reported_and_batch_continues() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.png");
    let bad = tmp.path().join("bad.jpg");
    write_photo(&good, 30, 60, Rgb([10, 200, 10]));
    fs::write(&bad, b"definitely not a jpeg").unwrap();

    let settings = BatchSettings {
        request: request("1:1", BackgroundKind::White),
        save: None,
    };
    let inputs = vec![bad.clone(), good.clone()];
    let summary = process_batch(&RustBackend::new(), &inputs, &settings, None).unwrap();

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].source, bad);
    assert_eq!(summary.generated.len(), 1);
    assert_eq!(summary.generated[0].width, 60);

    let report = tmp.path().join("report.json");
    write_report(&summary, &report).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["generated"][0]["fill"], "#ffffff");
    assert!(json["failed"][0]["error"].as_str().unwrap().contains("bad.jpg"));
}

#[test]
fn blurred_background_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("photo.png");
    write_photo(&path, 40, 100, Rgb([90, 120, 150]));

    let out = generate_from_path(
        &RustBackend::new(),
        &path,
        &request("2:3", BackgroundKind::Blurred),
    )
    .unwrap();

    assert_eq!(out.canvas.dimensions(), (66, 100));
    assert_eq!(out.fill, Fill::Blurred { radius: 13 });
    assert_eq!(out.geometry.offset_x, 13);
    assert_eq!(*out.canvas.get_pixel(13, 50), Rgb([90, 120, 150]));
    // Margins carry the photo's tint.
    let margin = out.canvas.get_pixel(5, 50);
    assert!(margin[0] < margin[1] && margin[1] < margin[2], "margin {margin:?}");
}

#[test]
fn identify_reads_header_only() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("photo.jpg");
    write_photo(&path, 120, 90, BLACK);

    let dims = RustBackend::new().identify(&path).unwrap();
    assert_eq!((dims.width, dims.height), (120, 90));
}

#[test]
fn unparsable_ratio_falls_back_to_square() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("photo.png");
    write_photo(&path, 50, 100, BLACK);

    let out = generate_from_path(
        &RustBackend::new(),
        &path,
        &request("garbage", BackgroundKind::White),
    )
    .unwrap();
    assert_eq!(out.canvas.dimensions(), (100, 100));
    assert_eq!(out.geometry.offset_x, 25);
}
