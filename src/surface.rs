//! Drawing-surface boundary.
//!
//! The engine only ever blits, clears and snapshots. [`RasterSurface`] does
//! that on an in-memory RGBA buffer so hosts can upload the result to
//! whatever they display with.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{CropperError, Result};
use crate::geometry::PixelRect;

/// Encoded bytes of a surface snapshot (PNG).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage(pub Vec<u8>);

impl EncodedImage {
    pub fn decode(&self) -> Result<RgbaImage> {
        Ok(image::load_from_memory(&self.0)?.to_rgba8())
    }
}

pub trait DrawingSurface {
    /// Intrinsic pixel size.
    fn dimensions(&self) -> (u32, u32);

    /// Replace the backing store with a blank one of the given size.
    fn resize(&mut self, width: u32, height: u32);

    /// Size the surface currently occupies on screen, in client pixels.
    fn rendered_size(&self) -> (f32, f32);

    /// Suggested on-screen size. Hosts with their own layout may ignore it.
    fn set_rendered_size_hint(&mut self, _hint: Option<(f32, f32)>) {}

    /// Copy `src` of `source` into `dst`, stretching when sizes differ.
    fn draw_region(&mut self, source: &RgbaImage, src: PixelRect, dst: PixelRect);

    fn clear_region(&mut self, rect: PixelRect);

    fn snapshot(&self) -> Result<EncodedImage>;
}

/// A [`DrawingSurface`] backed by an `image::RgbaImage`.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
    rendered: Option<(f32, f32)>,
    dirty: bool,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            rendered: None,
            dirty: true,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Record the on-screen size the host laid the surface out at.
    pub fn set_rendered_size(&mut self, width: f32, height: f32) {
        self.rendered = Some((width, height));
    }

    /// True once after any change to the pixels.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl DrawingSurface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
        self.dirty = true;
    }

    fn rendered_size(&self) -> (f32, f32) {
        self.rendered.unwrap_or_else(|| {
            let (w, h) = self.pixels.dimensions();
            (w as f32, h as f32)
        })
    }

    fn set_rendered_size_hint(&mut self, hint: Option<(f32, f32)>) {
        if let Some(size) = hint {
            self.rendered = Some(size);
        }
    }

    fn draw_region(&mut self, source: &RgbaImage, src: PixelRect, dst: PixelRect) {
        let Some((src, dst)) = clip_source(source.dimensions(), src, dst) else {
            return;
        };

        let (sx, sy) = (src.x.round() as u32, src.y.round() as u32);
        let (sw, sh) = (src.w.round() as u32, src.h.round() as u32);
        let (dw, dh) = (dst.w.round() as u32, dst.h.round() as u32);
        if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
            return;
        }

        let patch = imageops::crop_imm(source, sx, sy, sw, sh).to_image();
        let patch = if (sw, sh) == (dw, dh) {
            patch
        } else {
            imageops::resize(&patch, dw, dh, FilterType::Triangle)
        };
        imageops::overlay(
            &mut self.pixels,
            &patch,
            dst.x.round() as i64,
            dst.y.round() as i64,
        );
        self.dirty = true;
    }

    fn clear_region(&mut self, rect: PixelRect) {
        let (w, h) = self.pixels.dimensions();
        let x0 = rect.x.max(0.0).round() as u32;
        let y0 = rect.y.max(0.0).round() as u32;
        let x1 = ((rect.x + rect.w).round().max(0.0) as u32).min(w);
        let y1 = ((rect.y + rect.h).round().max(0.0) as u32).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        self.dirty = true;
    }

    fn snapshot(&self) -> Result<EncodedImage> {
        let (w, h) = self.pixels.dimensions();
        if w == 0 || h == 0 {
            return Err(CropperError::EmptySurface);
        }
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(EncodedImage(bytes))
    }
}

/// Intersect `src` with the source image and shrink `dst` by the same
/// proportion, so blits that hang off an edge copy what exists.
fn clip_source(size: (u32, u32), src: PixelRect, dst: PixelRect) -> Option<(PixelRect, PixelRect)> {
    if src.w <= 0.0 || src.h <= 0.0 {
        return None;
    }
    let kx = dst.w / src.w;
    let ky = dst.h / src.h;

    let x0 = src.x.max(0.0);
    let y0 = src.y.max(0.0);
    let x1 = (src.x + src.w).min(size.0 as f64);
    let y1 = (src.y + src.h).min(size.1 as f64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let clipped_src = PixelRect::new(x0, y0, x1 - x0, y1 - y0);
    let clipped_dst = PixelRect::new(
        dst.x + (x0 - src.x) * kx,
        dst.y + (y0 - src.y) * ky,
        (x1 - x0) * kx,
        (y1 - y0) * ky,
    );
    Some((clipped_src, clipped_dst))
}
