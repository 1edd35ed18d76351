// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
//! # Surface
//!
//! A block-padded RGB pixel surface.
//!
//! The surface stores three bytes per pixel in a single row-major allocation whose dimensions are
//! rounded up to whole blocks of [`BLOCK_SIZE`] pixels. The padded width is always a power of two,
//! which keeps the row stride aligned for block-based tiling. Pixel data is exchanged with
//! foreign buffers, such as the drawing surface of a windowing toolkit, through strided region
//! copies in either a packed 24-bit or a padded 32-bit layout.
//!
//! ## Usage
//!
//! ```
//! use image_surface::{PixelFormat, Region, Surface};
//!
//! let mut surface = Surface::new(10, 10);
//! surface.render_test_pattern();
//! assert_eq!(surface.pixel(3, 4).to_array(), [3, 4, 25]);
//!
//! // Copy into a 32-bit buffer whose fourth byte is owned by the caller.
//! let stride = 4 * 10;
//! let mut pixels = vec![0xff; stride * 10];
//! surface.render_to(&mut pixels, stride, Region::new(0, 0, 10, 10), PixelFormat::Rgbx);
//! assert_eq!(&pixels[4 * 3 + 4 * stride..][..4], &[3, 4, 25, 0xff]);
//! ```
//!
//! Layouts can be computed, and rejected, before any memory is reserved:
//!
//! ```
//! use image_surface::{Surface, SurfaceLayout};
//!
//! let layout = SurfaceLayout::new(100, 30)?;
//! assert_eq!(layout.padded_width(), 128);
//! assert_eq!(layout.padded_height(), 64);
//!
//! let surface = Surface::with_layout(layout)?;
//! assert!(surface.as_bytes().iter().all(|&b| b == 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
// Be std for doctests and unit tests, avoids a weird warning about missing allocator.
#![cfg_attr(not(any(doctest, test)), no_std)]
#![deny(unsafe_code)]
extern crate alloc;

mod format;
/// Padded dimension arithmetic.
pub mod layout;
mod rgb;
/// The owned pixel buffer, its fill operations and region transfers.
mod surface;


pub use self::format::{PixelFormat, Region};
pub use self::layout::{LayoutError, SurfaceLayout, BLOCK_BITS, BLOCK_SIZE};
pub use self::rgb::Rgb;
pub use self::surface::{Surface, SurfaceError};
