use image_surface::{PixelFormat, Region, Surface};
use test_log::test;

fn pattern(width: usize, height: usize) -> Surface {
    let mut surface = Surface::new(width, height);
    surface.render_test_pattern();
    surface
}

#[test]
fn full_round_trip() {
    for format in [PixelFormat::Rgb, PixelFormat::Rgbx] {
        let source = pattern(100, 70);
        let stride = format.bytes_per_pixel() * 100;
        let mut buffer = vec![0u8; stride * 70];

        source.render_to(&mut buffer, stride, Region::full(source.layout()), format);

        let mut target = Surface::new(100, 70);
        target.load_from(&buffer, stride, 100, 70, format);

        // Padding is zero in both, so the whole allocation agrees.
        assert_eq!(source.as_bytes(), target.as_bytes(), "as {:?}", format);
    }
}

#[test]
fn region_round_trip() {
    let source = pattern(130, 90);
    let region = Region::new(17, 33, 61, 40);

    for format in [PixelFormat::Rgb, PixelFormat::Rgbx] {
        let bpp = format.bytes_per_pixel();
        // Rows are padded beyond the copied pixels.
        let stride = bpp * region.width + 5;
        let mut buffer = vec![0u8; stride * region.height];

        source.render_to(&mut buffer, stride, region, format);

        if format == PixelFormat::Rgbx {
            for j in 0..region.height {
                for i in 0..region.width {
                    assert_eq!(buffer[j * stride + bpp * i + 3], 0, "at ({}, {})", i, j);
                }
            }
        }

        let mut target = Surface::new(region.width, region.height);
        target.load_from(&buffer, stride, region.width, region.height, format);

        for y in 0..region.height {
            for x in 0..region.width {
                assert_eq!(
                    target.pixel(x, y),
                    source.pixel(region.x + x, region.y + y),
                    "at ({}, {}) as {:?}",
                    x,
                    y,
                    format
                );
            }
        }
    }
}

#[test]
fn formats_by_bits() {
    let source = pattern(9, 9);
    let mut rgb = vec![0u8; 3 * 9 * 9];
    let mut rgbx = vec![0x80u8; 4 * 9 * 9];

    let region = Region::full(source.layout());
    source.render_to(&mut rgb, 3 * 9, region, PixelFormat::from_bits_per_pixel(24));
    source.render_to(&mut rgbx, 4 * 9, region, PixelFormat::from_bits_per_pixel(32));

    for (packed, padded) in rgb.chunks_exact(3).zip(rgbx.chunks_exact(4)) {
        assert_eq!(packed, &padded[..3]);
        assert_eq!(padded[3], 0x80);
    }
}

#[test]
#[should_panic(expected = "Unsupported pixel format")]
fn bad_bits_per_pixel() {
    let source = pattern(4, 4);
    let mut dst = vec![0u8; 2 * 4 * 4];
    let format = PixelFormat::from_bits_per_pixel(16);
    source.render_to(&mut dst, 2 * 4, Region::new(0, 0, 4, 4), format);
}

#[test]
fn load_oversized_source() {
    let big = pattern(40, 40);
    let stride = 4 * 40;
    let mut buffer = vec![0u8; stride * 40];
    big.render_to(&mut buffer, stride, Region::full(big.layout()), PixelFormat::Rgbx);

    let mut small = Surface::new(10, 3);
    small.load_from(&buffer, stride, 40, 40, PixelFormat::Rgbx);

    for y in 0..3 {
        for x in 0..10 {
            assert_eq!(small.pixel(x, y), big.pixel(x, y));
        }
    }
}
