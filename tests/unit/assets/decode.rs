use super::*;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut out),
        image::ImageFormat::Png,
    )
    .unwrap();
    out
}

#[test]
fn decode_reports_natural_dimensions() {
    let frame = decode_image(&png_bytes(6, 4, [10, 20, 30, 255])).unwrap();
    assert_eq!(frame.width, 6);
    assert_eq!(frame.height, 4);
    assert_eq!(frame.rgba8_premul.len(), 6 * 4 * 4);
    assert!(!frame.is_degenerate());
}

#[test]
fn decode_premultiplies_alpha() {
    let frame = decode_image(&png_bytes(1, 1, [200, 100, 50, 128])).unwrap();
    let px = &frame.rgba8_premul[0..4];
    // c' = round(c * a / 255)
    assert_eq!(px, &[100, 50, 25, 128]);
}

#[test]
fn decode_zeroes_color_under_zero_alpha() {
    let frame = decode_image(&png_bytes(1, 1, [200, 100, 50, 0])).unwrap();
    assert_eq!(&frame.rgba8_premul[0..4], &[0, 0, 0, 0]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"not an image").is_err());
}
