// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use log::{debug, trace, warn};

use crate::format::{PixelFormat, Region};
use crate::layout::{LayoutError, SurfaceLayout};
use crate::rgb::Rgb;

/// An RGB pixel buffer padded to whole blocks.
///
/// The surface owns a single allocation of [`SurfaceLayout::byte_len`] bytes. Pixels are three
/// bytes each, row-major, with [`SurfaceLayout::row_stride`] bytes between rows. Only the pixels
/// within the requested width and height are meaningful; the padding is allocated so that rows
/// are aligned to a power of two and is otherwise only touched by [`Surface::clear`].
///
/// ## Usage for trusted inputs
///
/// Directly allocate your desired dimensions with [`Surface::new`]. This panics when the
/// dimensions are invalid or when the allocation fails.
///
/// ## Usage for untrusted inputs
///
/// Construct a [`SurfaceLayout`] first, which does not allocate, and inspect its
/// [`byte_len`](SurfaceLayout::byte_len) against your own limits. Then allocate it with
/// [`Surface::with_layout`], which reports a failed allocation as an error instead of aborting.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    layout: SurfaceLayout,
    bytes: Vec<u8>,
}

/// Error representation for a surface that could not be created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceError {
    kind: SurfaceErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SurfaceErrorKind {
    Layout(LayoutError),
    Allocation { bytes: usize },
}

impl Surface {
    /// Allocate a zeroed surface of the requested size.
    ///
    /// # Panics
    ///
    /// This panics when `width` or `height` is zero, when the padded buffer can not be described
    /// on this platform, or when the allocation fails. If you want to handle these cases consider
    /// using [`Surface::try_new`].
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(surface) => surface,
            Err(err) => panic!("{}", err),
        }
    }

    /// Try to allocate a zeroed surface of the requested size.
    pub fn try_new(width: usize, height: usize) -> Result<Self, SurfaceError> {
        let layout = SurfaceLayout::new(width, height)?;
        Self::with_layout(layout)
    }

    /// Allocate a zeroed surface with a precomputed layout.
    pub fn with_layout(layout: SurfaceLayout) -> Result<Self, SurfaceError> {
        let byte_len = layout.byte_len();

        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(byte_len).is_err() {
            warn!("Failed to allocate {} bytes for {:?}", byte_len, layout);
            return Err(SurfaceErrorKind::Allocation { bytes: byte_len }.into());
        }
        bytes.resize(byte_len, 0);

        debug!(
            "Surface requested {}x{}, allocated {}x{} ({}x{} blocks)",
            layout.width(),
            layout.height(),
            layout.padded_width(),
            layout.padded_height(),
            layout.block_width(),
            layout.block_height(),
        );

        Ok(Surface { layout, bytes })
    }

    /// Get the layout of the surface.
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// All pixels, padding included.
    pub fn as_slice(&self) -> &[Rgb] {
        bytemuck::cast_slice(&self.bytes)
    }

    /// All pixels, padding included.
    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        bytemuck::cast_slice_mut(&mut self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Release the surface, returning its padded pixel bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// In debug builds, when the coordinate is outside the requested dimensions. In all builds,
    /// when it is outside the padded allocation.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self[(x, y)]
    }

    /// Mutably borrow the pixel at `(x, y)`.
    ///
    /// Same panics as [`Surface::pixel`].
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Rgb {
        &mut self[(x, y)]
    }

    /// Set every byte of the buffer, padding included, to white.
    pub fn clear(&mut self) {
        trace!("Clearing {} bytes", self.bytes.len());
        self.bytes.fill(0xff);
    }

    /// Fill all requested pixels with a gradient test pattern.
    ///
    /// Each pixel becomes `(x % 256, y % 256, (x² + y²) % 256)`. Padding is left as is.
    pub fn render_test_pattern(&mut self) {
        let layout = self.layout;
        trace!("Test pattern over {}x{}", layout.width(), layout.height());

        let pixels = self.as_mut_slice();
        for y in 0..layout.height() {
            let start = layout.index_of(0, y);
            let row = &mut pixels[start..start + layout.width()];

            let yy = y.wrapping_mul(y);
            for (x, pixel) in row.iter_mut().enumerate() {
                let b = x.wrapping_mul(x).wrapping_add(yy);
                // Truncation is the reduction modulo 256.
                *pixel = Rgb::new(x as u8, y as u8, b as u8);
            }
        }
    }

    /// Copy a region of the surface into a foreign buffer.
    ///
    /// Row `j` of the region is written starting at byte `j * row_stride` of `dst`, each pixel
    /// occupying [`PixelFormat::bytes_per_pixel`] bytes. Only the red, green and blue bytes are
    /// written. With [`PixelFormat::Rgbx`] the fourth byte of each pixel keeps its value.
    ///
    /// The region is not clamped. It must lie within the requested dimensions of the surface,
    /// which is asserted in debug builds only.
    ///
    /// # Panics
    ///
    /// When `dst` is too short for the region with this stride and format.
    pub fn render_to(
        &self,
        dst: &mut [u8],
        row_stride: usize,
        region: Region,
        format: PixelFormat,
    ) {
        if region.is_empty() {
            return;
        }

        debug_assert!(
            region.fits(&self.layout),
            "Region {:?} outside of {}x{}",
            region,
            self.width(),
            self.height()
        );

        assert_buffer_len(dst.len(), row_stride, region.width, region.height, format);
        trace!("Render {:?} as {:?} with stride {}", region, format, row_stride);

        let pixels = self.as_slice();
        let bpp = format.bytes_per_pixel();
        for j in 0..region.height {
            let start = self.layout.index_of(region.x, region.y + j);
            let src = &pixels[start..start + region.width];
            let line = &mut dst[j * row_stride..][..region.width * bpp];

            match format {
                PixelFormat::Rgb => line.copy_from_slice(bytemuck::cast_slice(src)),
                PixelFormat::Rgbx => {
                    for (pixel, out) in src.iter().zip(line.chunks_exact_mut(bpp)) {
                        out[..Rgb::SIZE].copy_from_slice(&pixel.0);
                    }
                }
            }
        }
    }

    /// Copy pixels from a foreign buffer into the surface, starting at its origin.
    ///
    /// The source is laid out as in [`Surface::render_to`]. A `width` or `height` larger than
    /// the surface is clamped to its requested dimensions. With [`PixelFormat::Rgbx`] the fourth
    /// byte of each source pixel is ignored.
    ///
    /// # Panics
    ///
    /// When `src` is too short for the clamped extent with this stride and format.
    pub fn load_from(
        &mut self,
        src: &[u8],
        row_stride: usize,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) {
        let layout = self.layout;
        let w = width.min(layout.width());
        let h = height.min(layout.height());

        if (w, h) != (width, height) {
            debug!(
                "Clamped load of {}x{} to surface of {}x{}",
                width,
                height,
                layout.width(),
                layout.height()
            );
        }

        if w == 0 || h == 0 {
            return;
        }

        assert_buffer_len(src.len(), row_stride, w, h, format);
        trace!("Load {}x{} as {:?} with stride {}", w, h, format, row_stride);

        let pixels = self.as_mut_slice();
        let bpp = format.bytes_per_pixel();
        for j in 0..h {
            let start = layout.index_of(0, j);
            let row = &mut pixels[start..start + w];
            let line = &src[j * row_stride..][..w * bpp];

            match format {
                PixelFormat::Rgb => bytemuck::cast_slice_mut(row).copy_from_slice(line),
                PixelFormat::Rgbx => {
                    for (pixel, input) in row.iter_mut().zip(line.chunks_exact(bpp)) {
                        pixel.0.copy_from_slice(&input[..Rgb::SIZE]);
                    }
                }
            }
        }
    }
}

fn assert_buffer_len(
    len: usize,
    row_stride: usize,
    width: usize,
    height: usize,
    format: PixelFormat,
) {
    let required = format.buffer_len(row_stride, width, height);
    assert!(
        matches!(required, Some(required) if required <= len),
        "Buffer of {} bytes too short for {}x{} pixels as {:?} with stride {}",
        len,
        width,
        height,
        format,
        row_stride,
    );
}

impl SurfaceError {
    /// The layout error, if the dimensions were rejected before allocation.
    pub fn layout_error(&self) -> Option<LayoutError> {
        match self.kind {
            SurfaceErrorKind::Layout(err) => Some(err),
            SurfaceErrorKind::Allocation { .. } => None,
        }
    }

    /// Check if the error is due to memory not being available.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind, SurfaceErrorKind::Allocation { .. })
    }
}

impl From<SurfaceErrorKind> for SurfaceError {
    fn from(kind: SurfaceErrorKind) -> Self {
        SurfaceError { kind }
    }
}

impl From<LayoutError> for SurfaceError {
    fn from(err: LayoutError) -> Self {
        SurfaceErrorKind::Layout(err).into()
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            SurfaceErrorKind::Layout(err) => write!(f, "Invalid surface layout: {}", err),
            SurfaceErrorKind::Allocation { bytes } => {
                write!(f, "Surface buffer of {} bytes can not be allocated", bytes)
            }
        }
    }
}

impl core::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            SurfaceErrorKind::Layout(err) => Some(err),
            SurfaceErrorKind::Allocation { .. } => None,
        }
    }
}

impl Index<(usize, usize)> for Surface {
    type Output = Rgb;

    fn index(&self, (x, y): (usize, usize)) -> &Rgb {
        &self.as_slice()[self.layout.index_of(x, y)]
    }
}

impl IndexMut<(usize, usize)> for Surface {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Rgb {
        let index = self.layout.index_of(x, y);
        &mut self.as_mut_slice()[index]
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Surface")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
