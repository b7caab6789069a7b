// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The paint loop.  Every pixel is mapped to the complex plane, run
//! through the function and the colorizer, and written back to the
//! canvas.  Pixels don't depend on each other, so the threaded
//! version simply hands each worker its own strip of rows; the
//! strips are disjoint, so no locking is needed and the output is
//! byte-for-byte the same as the single-threaded loop.

use itertools::iproduct;
use num::Complex;

use crate::canvas::{Canvas, ImageSize, Pixel, Strip, CHANNELS};
use crate::colorizer::colorize;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::functions::ComplexFn;
use crate::planes::PlaneMapper;

/// Renders domain colorings of a fixed size over a fixed window of
/// the complex plane.  Holds no per-image state; one renderer can
/// paint any number of canvases of its size.
#[derive(Copy, Clone, Debug)]
pub struct DomainRenderer {
    plane: PlaneMapper,
}

impl DomainRenderer {
    /// Requires the size of the image and the extent of the visible
    /// window (real part is the horizontal extent, imaginary part the
    /// vertical).  Fails if the extent is not positive and finite.
    pub fn new(size: ImageSize, extent: Complex<f64>) -> Result<Self> {
        Ok(DomainRenderer {
            plane: PlaneMapper::new(size, extent)?,
        })
    }

    /// The pixel to plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    fn check(&self, canvas: &Canvas) -> Result<()> {
        let (have, want) = (canvas.size(), self.plane.size);
        if have != want {
            return Err(Error::SizeMismatch {
                width: have.width(),
                height: have.height(),
                expected_width: want.width(),
                expected_height: want.height(),
            });
        }
        Ok(())
    }

    /// The reference loop: one thread, top row first.
    pub fn render_single<F>(&self, canvas: &mut Canvas, f: &F) -> Result<()>
    where
        F: ComplexFn + ?Sized,
    {
        self.check(canvas)?;
        let size = self.plane.size;
        for (row, column) in iproduct!(0..size.height(), 0..size.width()) {
            let pixel = Pixel(column as isize, row as isize);
            debug_assert!(canvas.get(pixel).is_some(), "{:?} is off the canvas", pixel);
            let point = self.plane.pixel_to_point(&pixel);
            canvas.write(pixel, colorize(point.re, point.im, f));
        }
        Ok(())
    }

    fn paint_strip<F>(&self, strip: &mut Strip, f: &F)
    where
        F: ComplexFn + ?Sized,
    {
        let rows = strip.rows();
        trace!("painting rows {}..{}", rows.start, rows.end);
        for (row, column) in iproduct!(rows, 0..self.plane.size.width()) {
            let pixel = Pixel(column as isize, row as isize);
            debug_assert!(strip.contains(pixel), "{:?} is outside rows {:?}", pixel, strip.rows());
            let point = self.plane.pixel_to_point(&pixel);
            strip.write(pixel, colorize(point.re, point.im, f));
        }
    }

    /// Renders with up to `threads` workers, each painting its own
    /// band of rows.  Zero threads is treated as one.
    pub fn render<F>(&self, canvas: &mut Canvas, f: &F, threads: usize) -> Result<()>
    where
        F: ComplexFn + ?Sized,
    {
        self.check(canvas)?;
        let height = self.plane.size.height();
        let threads = threads.max(1).min(height);
        debug!(
            "rendering {}x{} over {}x{} with {} thread(s)",
            self.plane.size.width(),
            height,
            self.plane.extent.re,
            self.plane.extent.im,
            threads
        );
        if threads == 1 {
            return self.render_single(canvas, f);
        }

        let rows = (height + threads - 1) / threads;
        let strips = canvas.strips_mut(rows);
        crossbeam::scope(|spawner| {
            for mut strip in strips {
                spawner.spawn(move |_| self.paint_strip(&mut strip, f));
            }
        })
        .map_err(|_| Error::WorkerPanicked)
    }
}

/// Renders `f` onto a fresh canvas and hands the finished buffer to
/// `encoder`.  The canvas does not outlive the call.
pub fn plot<F, E>(
    size: ImageSize,
    extent: Complex<f64>,
    f: &F,
    threads: usize,
    encoder: &mut E,
) -> Result<()>
where
    F: ComplexFn + ?Sized,
    E: Encoder + ?Sized,
{
    let renderer = DomainRenderer::new(size, extent)?;
    let mut canvas = Canvas::new(size);
    renderer.render(&mut canvas, f, threads)?;
    encoder.encode(canvas.pixels(), size.width(), size.height(), CHANNELS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::Builtin;

    fn size(width: usize, height: usize) -> ImageSize {
        ImageSize::new(width, height).unwrap()
    }

    fn rendered(width: usize, height: usize, f: &dyn ComplexFn, threads: usize) -> Vec<u8> {
        let renderer = DomainRenderer::new(size(width, height), Complex::new(4.0, 3.0)).unwrap();
        let mut canvas = Canvas::new(size(width, height));
        renderer.render(&mut canvas, f, threads).unwrap();
        canvas.into_pixels()
    }

    #[test]
    fn bad_extent_is_a_configuration_error() {
        assert!(DomainRenderer::new(size(4, 4), Complex::new(-4.0, 4.0)).is_err());
    }

    #[test]
    fn canvas_of_the_wrong_size_is_refused() {
        let renderer = DomainRenderer::new(size(4, 4), Complex::new(4.0, 4.0)).unwrap();
        let mut canvas = Canvas::new(size(5, 4));
        match renderer.render_single(&mut canvas, &Builtin::Identity) {
            Err(Error::SizeMismatch { width: 5, .. }) => {}
            other => panic!("expected a size mismatch, got {:?}", other),
        }
        assert!(canvas.pixels().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn threaded_matches_single() {
        let single = rendered(37, 23, &Builtin::Square, 1);
        for &threads in &[2, 3, 4, 8, 23, 64] {
            assert_eq!(single, rendered(37, 23, &Builtin::Square, threads), "{} threads", threads);
        }
    }

    #[test]
    fn every_pixel_is_painted_exactly_in_bounds() {
        for &threads in &[1, 2, 5] {
            let pixels = rendered(9, 7, &Builtin::Identity, threads);
            assert_eq!(pixels.len(), 9 * 7 * CHANNELS);
            assert!(
                pixels.chunks(CHANNELS).all(|p| p.iter().any(|&b| b != 0xFF)),
                "{} threads left background behind",
                threads
            );
        }
    }

    #[test]
    fn zero_threads_still_renders() {
        assert_eq!(
            rendered(8, 8, &Builtin::Identity, 0),
            rendered(8, 8, &Builtin::Identity, 1)
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let f = |z: Complex<f64>| z * z - Complex::new(1.0, 0.0);
        assert_eq!(rendered(16, 16, &f, 4), rendered(16, 16, &f, 4));
    }

    #[test]
    fn each_pixel_is_the_colorized_point() {
        let renderer = DomainRenderer::new(size(4, 4), Complex::new(4.0, 4.0)).unwrap();
        let mut canvas = Canvas::new(size(4, 4));
        renderer.render_single(&mut canvas, &Builtin::Cube).unwrap();
        for &p in &[Pixel(0, 0), Pixel(3, 1), Pixel(2, 2)] {
            let point = renderer.plane().pixel_to_point(&p);
            assert_eq!(canvas.get(p), Some(colorize(point.re, point.im, &Builtin::Cube)));
        }
    }

    struct Captured {
        bytes: Vec<u8>,
        shape: (usize, usize, usize),
    }

    impl Encoder for Captured {
        fn encode(&mut self, pixels: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
            self.bytes = pixels.to_vec();
            self.shape = (width, height, channels);
            Ok(())
        }
    }

    #[test]
    fn plot_hands_the_finished_buffer_to_the_encoder() {
        let mut captured = Captured {
            bytes: vec![],
            shape: (0, 0, 0),
        };
        plot(size(6, 5), Complex::new(4.0, 3.0), &Builtin::Identity, 2, &mut captured).unwrap();
        assert_eq!(captured.shape, (6, 5, 3));
        assert_eq!(captured.bytes.len(), 6 * 5 * 3);

        let renderer = DomainRenderer::new(size(6, 5), Complex::new(4.0, 3.0)).unwrap();
        let mut canvas = Canvas::new(size(6, 5));
        renderer.render_single(&mut canvas, &Builtin::Identity).unwrap();
        assert_eq!(captured.bytes, canvas.into_pixels());
    }

    #[test]
    fn plot_rejects_a_bad_extent_before_encoding() {
        let mut captured = Captured {
            bytes: vec![],
            shape: (0, 0, 0),
        };
        assert!(plot(size(2, 2), Complex::new(0.0, 1.0), &Builtin::Identity, 1, &mut captured).is_err());
        assert_eq!(captured.shape, (0, 0, 0));
    }
}
