// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
use core::fmt;

use crate::rgb::Rgb;

/// The binary logarithm of [`BLOCK_SIZE`].
pub const BLOCK_BITS: u32 = 6;

/// The edge length of a block, in pixels.
///
/// Both dimensions of a surface allocation are rounded up to a multiple of this.
pub const BLOCK_SIZE: usize = 1 << BLOCK_BITS;

/// The padded, block-aligned layout of a surface.
///
/// The logical dimensions are those requested by the caller. The allocation covers a whole number
/// of blocks in each direction, and the number of blocks per row is always a power of two so that
/// the byte offset of a row is a shifted multiple of three. Pixels are stored row-major, three
/// bytes each, without any holes between the padded rows.
///
/// A layout is validated on construction. All derived quantities, in particular
/// [`byte_len`](Self::byte_len), are guaranteed to fit into a `usize` and to describe a valid
/// allocation size, so no method on an existing layout overflows.
///
/// ```
/// use image_surface::{SurfaceLayout, BLOCK_SIZE};
///
/// let layout = SurfaceLayout::new(65, 65).unwrap();
/// assert_eq!(layout.block_width(), 2);
/// assert_eq!(layout.block_height(), 2);
/// assert_eq!(layout.row_stride(), 3 * 2 * BLOCK_SIZE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceLayout {
    width: usize,
    height: usize,
    block_width: usize,
    block_height: usize,
}

/// Error that occurs when the dimensions do not describe a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutError {
    kind: LayoutErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutErrorKind {
    ZeroWidth,
    ZeroHeight,
    OutOfMemory,
}

impl SurfaceLayout {
    /// Compute the padded layout for a surface of the requested size.
    ///
    /// This does not allocate. It fails when either dimension is zero or when the padded buffer
    /// would not be addressable on the current platform.
    pub fn new(width: usize, height: usize) -> Result<Self, LayoutError> {
        if width == 0 {
            return Err(LayoutErrorKind::ZeroWidth.into());
        }

        if height == 0 {
            return Err(LayoutErrorKind::ZeroHeight.into());
        }

        let block_height = (height - 1) / BLOCK_SIZE + 1;

        // The smallest power of two, at least one block, that covers the width.
        let padded_width = width
            .checked_next_power_of_two()
            .ok_or(LayoutErrorKind::OutOfMemory)?
            .max(BLOCK_SIZE);
        let block_width = padded_width >> BLOCK_BITS;

        let layout = SurfaceLayout {
            width,
            height,
            block_width,
            block_height,
        };

        layout.checked_byte_len().ok_or(LayoutErrorKind::OutOfMemory)?;

        debug_assert!(layout.padded_width() >= width);
        debug_assert!(layout.padded_height() >= height);
        Ok(layout)
    }

    fn checked_byte_len(&self) -> Option<usize> {
        let padded_height = self.block_height.checked_mul(BLOCK_SIZE)?;
        let texels = (self.block_width * BLOCK_SIZE).checked_mul(padded_height)?;
        let bytes = texels.checked_mul(Rgb::SIZE)?;

        // Allocations are limited to `isize::MAX` bytes.
        if bytes > isize::MAX as usize {
            return None;
        }

        Some(bytes)
    }

    /// The requested number of pixels in width direction.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The requested number of pixels in height direction.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of blocks per row.
    pub fn block_width(&self) -> usize {
        self.block_width
    }

    /// The number of blocks per column.
    pub fn block_height(&self) -> usize {
        self.block_height
    }

    /// The allocated number of pixels per row, a power of two.
    pub fn padded_width(&self) -> usize {
        self.block_width * BLOCK_SIZE
    }

    /// The allocated number of rows.
    pub fn padded_height(&self) -> usize {
        self.block_height * BLOCK_SIZE
    }

    /// The number of bytes from the start of one row to the start of the next.
    pub fn row_stride(&self) -> usize {
        Rgb::SIZE * self.padded_width()
    }

    /// The number of pixels in the allocation, padding included.
    pub fn pixel_count(&self) -> usize {
        self.padded_width() * self.padded_height()
    }

    /// Get the required bytes for this layout.
    pub fn byte_len(&self) -> usize {
        // Exactly this does not overflow due to construction.
        Rgb::SIZE * self.pixel_count()
    }

    /// Check if a coordinate lies within the requested dimensions.
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// The index of the pixel at `(x, y)` within the pixel slice.
    ///
    /// Coordinates must be within the requested dimensions. This is only asserted in debug builds;
    /// in release builds a coordinate within the padding addresses padding pixels.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            self.in_bounds(x, y),
            "Pixel ({}, {}) outside of {}x{}",
            x,
            y,
            self.width,
            self.height
        );

        y * self.padded_width() + x
    }

    /// The byte offset of the pixel at `(x, y)`.
    ///
    /// The three bytes starting here hold the red, green and blue sample. Same preconditions as
    /// [`index_of`](Self::index_of).
    #[inline]
    pub fn offset_of(&self, x: usize, y: usize) -> usize {
        self.index_of(x, y) * Rgb::SIZE
    }
}

impl fmt::Debug for SurfaceLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SurfaceLayout")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("block_width", &self.block_width)
            .field("block_height", &self.block_height)
            .finish()
    }
}

impl From<LayoutErrorKind> for LayoutError {
    fn from(kind: LayoutErrorKind) -> Self {
        LayoutError { kind }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            LayoutErrorKind::ZeroWidth => write!(f, "Surface width must not be zero"),
            LayoutErrorKind::ZeroHeight => write!(f, "Surface height must not be zero"),
            LayoutErrorKind::OutOfMemory => {
                write!(f, "Surface layout can not fit into memory")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_power_of_two() {
        for width in 1..=1100 {
            let layout = SurfaceLayout::new(width, 1).unwrap();
            let padded = layout.padded_width();
            assert!(padded >= width, "at {}", width);
            assert!(padded.is_power_of_two(), "at {}", width);
            assert!(padded >= BLOCK_SIZE);
            // Smallest such power.
            assert!(padded == BLOCK_SIZE || padded / 2 < width, "at {}", width);
        }
    }

    #[test]
    fn pixel_count_includes_padding() {
        let layout = SurfaceLayout::new(100, 65).unwrap();
        assert_eq!(layout.pixel_count(), 128 * 128);
        assert_eq!(layout.byte_len(), 3 * layout.pixel_count());
        assert!(layout.pixel_count() >= layout.width() * layout.height());
    }

    #[test]
    fn height_rounds_to_blocks() {
        let expected = [(1, 1), (63, 1), (64, 1), (65, 2), (128, 2), (129, 3), (200, 4)];
        for (height, blocks) in expected {
            let layout = SurfaceLayout::new(1, height).unwrap();
            assert_eq!(layout.block_height(), blocks, "at {}", height);
        }
    }

    #[test]
    fn addressing() {
        let layout = SurfaceLayout::new(100, 3).unwrap();
        assert_eq!(layout.row_stride(), 3 * 128);
        assert_eq!(layout.offset_of(0, 0), 0);
        assert_eq!(layout.offset_of(1, 0), 3);
        assert_eq!(layout.offset_of(0, 1), 3 * 128);
        assert_eq!(layout.offset_of(99, 2), 2 * 3 * 128 + 3 * 99);
        assert!(layout.offset_of(99, 2) + 3 <= layout.byte_len());
    }

    #[test]
    fn rejects_invalid() {
        assert!(SurfaceLayout::new(0, 1).is_err());
        assert!(SurfaceLayout::new(1, 0).is_err());
        assert!(SurfaceLayout::new(usize::MAX, 1).is_err());
        assert!(SurfaceLayout::new(1, usize::MAX).is_err());
        assert!(SurfaceLayout::new(1 << 20, 1 << 20).is_err() == (usize::BITS < 64));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn out_of_bounds_is_asserted() {
        let layout = SurfaceLayout::new(10, 10).unwrap();
        let _ = layout.offset_of(10, 0);
    }
}
