//! Benchmarks region copies between a surface and foreign buffers.
use brunch::Bench;

use image_surface::{PixelFormat, Region, Surface, SurfaceError};

struct Transfer {
    format: PixelFormat,
    sz: usize,
}

impl Transfer {
    fn name(&self, op: &str) -> String {
        format!("{}({:?}, {})", op, self.format, self.sz)
    }

    fn prepare_render(&self) -> Result<impl FnMut(), SurfaceError> {
        let mut surface = Surface::try_new(self.sz, self.sz)?;
        surface.render_test_pattern();

        let (format, region) = (self.format, Region::full(surface.layout()));
        let stride = format.bytes_per_pixel() * self.sz;
        let mut buffer = vec![0u8; stride * self.sz];

        Ok(move || surface.render_to(&mut buffer, stride, region, format))
    }

    fn prepare_load(&self) -> Result<impl FnMut(), SurfaceError> {
        let mut surface = Surface::try_new(self.sz, self.sz)?;

        let (format, sz) = (self.format, self.sz);
        let stride = format.bytes_per_pixel() * sz;
        let buffer = vec![0x42u8; stride * sz];

        Ok(move || surface.load_from(&buffer, stride, sz, sz, format))
    }
}

fn main() {
    let tests = [
        Transfer {
            format: PixelFormat::Rgb,
            sz: 128,
        },
        Transfer {
            format: PixelFormat::Rgbx,
            sz: 128,
        },
        Transfer {
            format: PixelFormat::Rgb,
            sz: 1000,
        },
        Transfer {
            format: PixelFormat::Rgbx,
            sz: 1000,
        },
    ];

    let mut benches = brunch::Benches::default();

    for test in &tests {
        let render = match test.prepare_render() {
            Ok(bench) => bench,
            Err(err) => panic!("Failed to setup benchmark {}: {:?}", test.name("render"), err),
        };
        benches.push(Bench::new(format!("surface::transfer::{}", test.name("render"))).run(render));

        let load = match test.prepare_load() {
            Ok(bench) => bench,
            Err(err) => panic!("Failed to setup benchmark {}: {:?}", test.name("load"), err),
        };
        benches.push(Bench::new(format!("surface::transfer::{}", test.name("load"))).run(load));
    }

    let mut surface = Surface::new(1000, 1000);
    benches.push(Bench::new("surface::test_pattern(1000)").run(|| surface.render_test_pattern()));
    benches.push(Bench::new("surface::clear(1000)").run(|| surface.clear()));

    benches.finish();
}
