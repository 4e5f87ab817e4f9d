use super::*;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="0 0 4 4">
<rect x="0" y="0" width="4" height="4" fill="#ffffff"/>
<path d="M0 0L2 0L2 2L0 2Z" fill="#000000" fill-opacity="1"/>
</svg>"##;

#[test]
fn rasterizes_filled_regions() {
    let rgba = rasterize_svg_to_rgba8(SQUARE, 4, 4).unwrap();
    assert_eq!(rgba.len(), 4 * 4 * 4);
    // Top-left pixel is covered by the black square, bottom-right is background.
    assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
    let last = rgba.len() - 4;
    assert_eq!(&rgba[last..], &[255, 255, 255, 255]);
}

#[test]
fn scales_to_requested_size() {
    let rgba = rasterize_svg_to_rgba8(SQUARE, 8, 8).unwrap();
    assert_eq!(rgba.len(), 8 * 8 * 4);
    let idx = (3 * 8 + 3) * 4;
    assert_eq!(&rgba[idx..idx + 4], &[0, 0, 0, 255]);
}

#[test]
fn rejects_empty_and_oversized_targets() {
    assert!(rasterize_svg_to_rgba8(SQUARE, 0, 4).is_err());
    assert!(rasterize_svg_to_rgba8(SQUARE, 4, MAX_DIM + 1).is_err());
}

#[test]
fn rejects_malformed_svg() {
    assert!(rasterize_svg_to_rgba8("<svg", 4, 4).is_err());
}

#[test]
fn writes_png_file() {
    let dir = std::env::temp_dir().join(format!(
        "audioflash_raster_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let out = dir.join("frame.png");
    save_png(SQUARE, 4, 4, &out).unwrap();
    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (4, 4));
    std::fs::remove_dir_all(&dir).unwrap();
}
