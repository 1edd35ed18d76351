// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
use crate::layout::SurfaceLayout;

/// The pixel layout of a foreign buffer that a surface is copied to or from.
///
/// Both formats start each pixel with the red, green and blue byte. The padded format has one
/// more byte per pixel which the surface never reads or writes, it is owned by the caller and
/// typically holds an alpha value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed, 24 bits per pixel.
    Rgb,
    /// Padded, 32 bits per pixel.
    Rgbx,
}

/// A rectangle of pixels, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    /// The leftmost column.
    pub x: usize,
    /// The topmost row.
    pub y: usize,
    /// The number of pixels in width direction.
    pub width: usize,
    /// The number of pixels in height direction.
    pub height: usize,
}

impl PixelFormat {
    /// Choose the format with the given number of bits per pixel.
    ///
    /// # Panics
    ///
    /// Only 24 and 32 bits are supported. Any other value is a usage error and panics. Use
    /// [`PixelFormat::try_from_bits_per_pixel`] to check a value of unknown origin.
    pub fn from_bits_per_pixel(bits: u32) -> Self {
        match Self::try_from_bits_per_pixel(bits) {
            Some(format) => format,
            None => panic!("Unsupported pixel format of {} bits per pixel", bits),
        }
    }

    /// Choose the format with the given number of bits per pixel, if there is one.
    pub const fn try_from_bits_per_pixel(bits: u32) -> Option<Self> {
        match bits {
            24 => Some(PixelFormat::Rgb),
            32 => Some(PixelFormat::Rgbx),
            _ => None,
        }
    }

    pub const fn bits_per_pixel(self) -> u32 {
        8 * self.bytes_per_pixel() as u32
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgbx => 4,
        }
    }

    /// The minimum length of a buffer holding `width` by `height` pixels with the row stride.
    ///
    /// The last row need not be padded to the full stride. Returns `None` if the length is not
    /// representable.
    pub fn buffer_len(self, row_stride: usize, width: usize, height: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return Some(0);
        }

        let last_row = (height - 1).checked_mul(row_stride)?;
        let row = width.checked_mul(self.bytes_per_pixel())?;
        last_row.checked_add(row)
    }
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// The region covering all requested pixels of a layout, padding excluded.
    pub fn full(layout: &SurfaceLayout) -> Self {
        Region::new(0, 0, layout.width(), layout.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check that the region is within the requested dimensions of a layout.
    pub fn fits(&self, layout: &SurfaceLayout) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!(
            (right, bottom),
            (Some(right), Some(bottom)) if right <= layout.width() && bottom <= layout.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        assert_eq!(PixelFormat::from_bits_per_pixel(24), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_bits_per_pixel(32), PixelFormat::Rgbx);
        assert_eq!(PixelFormat::Rgb.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Rgbx.bits_per_pixel(), 32);

        for bits in [0, 3, 4, 8, 16, 23, 25, 31, 33, 48, 64] {
            assert_eq!(PixelFormat::try_from_bits_per_pixel(bits), None, "at {}", bits);
        }
    }

    #[test]
    #[should_panic(expected = "Unsupported pixel format")]
    fn bad_bits_panic() {
        let _ = PixelFormat::from_bits_per_pixel(16);
    }

    #[test]
    fn buffer_len() {
        assert_eq!(PixelFormat::Rgb.buffer_len(30, 10, 2), Some(60));
        assert_eq!(PixelFormat::Rgbx.buffer_len(48, 10, 2), Some(88));
        assert_eq!(PixelFormat::Rgbx.buffer_len(48, 0, 2), Some(0));
        assert_eq!(PixelFormat::Rgb.buffer_len(usize::MAX, 1, 3), None);
    }

    #[test]
    fn region_fits() {
        let layout = SurfaceLayout::new(10, 5).unwrap();
        assert!(Region::full(&layout).fits(&layout));
        assert!(Region::new(9, 4, 1, 1).fits(&layout));
        assert!(!Region::new(9, 4, 2, 1).fits(&layout));
        assert!(!Region::new(0, 5, 1, 1).fits(&layout));
        assert!(!Region::new(usize::MAX, 0, 2, 1).fits(&layout));
    }
}
