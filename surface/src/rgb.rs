// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
use bytemuck::{Pod, Zeroable};

/// A pixel of a surface, one red, green and blue sample each.
///
/// This is a plain old data type. A slice of pixels can be viewed as its bytes and vice versa
/// without any copy, see [`bytemuck::cast_slice`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub(crate) const SIZE: usize = core::mem::size_of::<Self>();

    pub const BLACK: Self = Rgb([0x00; 3]);
    pub const WHITE: Self = Rgb([0xff; 3]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    pub const fn r(self) -> u8 {
        self.0[0]
    }

    pub const fn g(self) -> u8 {
        self.0[1]
    }

    pub const fn b(self) -> u8 {
        self.0[2]
    }

    pub const fn to_array(self) -> [u8; 3] {
        self.0
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Rgb(rgb)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.0
    }
}
