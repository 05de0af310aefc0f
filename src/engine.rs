use std::path::Path;

use image::RgbaImage;

use crate::config::EngineConfig;
use crate::cursor::CursorToken;
use crate::drag::apply_move;
use crate::error::Result;
use crate::geometry::{CropRect, ImageBounds, PixelRect, Scale};
use crate::hit_test::{HitTester, Region};
use crate::input::{InputEvent, Subscription};
use crate::pointer::{PointerDeltaSource, PointerSample, delta_source};
use crate::resize::ResizeEngine;
use crate::scheduler::{FrameClock, FrameHandle, FrameScheduler, ScheduledSample};
use crate::session::{CropSession, InteractionMode};
use crate::surface::{DrawingSurface, EncodedImage};

/// Owns the crop box for one image at a time and turns pointer input into
/// geometry updates and redraws.
///
/// `S` is the drawing surface type used for the interactive surface and the
/// optional preview; `C` delivers paint frames.
pub struct CropEngine<S: DrawingSurface, C: FrameClock> {
    config: EngineConfig,
    surface: S,
    preview: Option<S>,
    clock: C,
    scheduler: FrameScheduler,
    deltas: Box<dyn PointerDeltaSource>,
    hit_tester: HitTester,
    resizer: ResizeEngine,
    source: Option<RgbaImage>,
    overlay: Option<RgbaImage>,
    session: Option<CropSession>,
    previewed: bool,
}

impl<S: DrawingSurface, C: FrameClock> CropEngine<S, C> {
    pub fn new(surface: S, clock: C, config: EngineConfig) -> Self {
        let mut hit_tester = HitTester::new(config.move_zone_radius, config.corner_zone_radius);
        hit_tester.move_enabled = false;
        hit_tester.corners_enabled = false;
        Self {
            deltas: delta_source(config.delta_source),
            resizer: ResizeEngine::new(config.zoom_clearance),
            hit_tester,
            config,
            surface,
            preview: None,
            clock,
            scheduler: FrameScheduler::new(),
            source: None,
            overlay: None,
            session: None,
            previewed: false,
        }
    }

    /// Start a session on `image`.
    ///
    /// Any frame still pending from the previous session is cancelled and
    /// drag/resize are switched off again. `handle_image_path` is the
    /// overlay stretched over the crop box; if it is missing or cannot be
    /// decoded the box works but is drawn undecorated.
    pub fn init(
        &mut self,
        image: RgbaImage,
        rendered_size_hint: Option<(f32, f32)>,
        handle_image_path: Option<&Path>,
    ) {
        self.scheduler.cancel(&mut self.clock);
        self.deltas.reset();
        self.hit_tester.move_enabled = false;
        self.hit_tester.corners_enabled = false;
        self.previewed = false;

        let (width, height) = image.dimensions();
        let bounds = ImageBounds::new(width, height);
        self.surface.resize(width, height);
        self.surface.set_rendered_size_hint(rendered_size_hint);
        let full = PixelRect::from_size(width as f64, height as f64);
        self.surface.draw_region(&image, full, full);

        self.overlay = handle_image_path.and_then(|path| match image::open(path) {
            Ok(overlay) => Some(overlay.to_rgba8()),
            Err(e) => {
                log::warn!("handle overlay {} unavailable: {}", path.display(), e);
                None
            }
        });

        let session = CropSession::new(bounds, self.config.initial_fraction);
        log::debug!("session started on {}x{} image, crop {:?}", width, height, session.rect);
        self.session = Some(session);
        self.source = Some(image);

        if let Some(preview) = self.preview.as_mut() {
            let (w, h) = preview.dimensions();
            preview.clear_region(PixelRect::from_size(w as f64, h as f64));
        }
        self.draw_overlay(session.rect);
    }

    /// Allow the box to be dragged by its center. A supplied preview
    /// surface replaces the current one and is redrawn after every frame.
    pub fn enable_drag(&mut self, preview: Option<S>) {
        self.hit_tester.move_enabled = true;
        if preview.is_some() {
            self.preview = preview;
        }
        self.redraw_preview();
    }

    /// Allow resizing from the corners. Boxes are move-only until this is
    /// called.
    pub fn enable_resize(&mut self) {
        self.hit_tester.corners_enabled = true;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(sample) => self.pointer_down(&sample),
            InputEvent::PointerMove(sample) => self.pointer_move(&sample),
            InputEvent::PointerUp => self.pointer_up(),
        }
    }

    /// Handle every event queued on `subscription`.
    pub fn pump(&mut self, subscription: &Subscription) {
        for event in subscription.drain() {
            self.handle_event(event);
        }
    }

    pub fn pointer_down(&mut self, sample: &PointerSample) {
        let Some(session) = self.session else {
            return;
        };
        let scale = self.scale();
        let region = self.hit_tester.classify(sample, session.rect, scale);
        let next = session.pressed(region, scale);
        if next.mode != session.mode {
            log::debug!("{:?} -> {:?}", session.mode, next.mode);
            self.deltas.reset();
        }
        self.session = Some(next);
    }

    /// Update hover state, and queue a frame if a gesture is in progress.
    pub fn pointer_move(&mut self, sample: &PointerSample) {
        let Some(session) = self.session else {
            return;
        };
        // Layout can change between events, so the scale is never reused.
        let scale = self.scale();
        let region = self.hit_tester.classify(sample, session.rect, scale);
        let session = session.hovered(region, scale);
        self.session = Some(session);

        if session.mode.is_active() {
            let scheduled = ScheduledSample {
                sample: *sample,
                scale,
            };
            self.scheduler.offer(scheduled, &mut self.clock);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(session) = self.session {
            if session.mode.is_active() {
                log::debug!("{:?} -> Idle", session.mode);
            }
            self.session = Some(session.released());
        }
    }

    /// The paint callback for `handle`. Stale handles are ignored.
    pub fn run_frame(&mut self, handle: FrameHandle) {
        let Some(ScheduledSample { sample, scale }) = self.scheduler.claim(handle) else {
            return;
        };
        let Some(session) = self.session else {
            return;
        };

        let rect = match session.mode {
            InteractionMode::Idle => session.rect,
            InteractionMode::Moving => apply_move(&sample, session.rect, session.bounds, scale),
            InteractionMode::Resizing(corner) => {
                let delta = self.deltas.delta(&sample);
                self.resizer
                    .apply(delta, session.rect, corner, session.bounds, scale)
            }
        };

        if rect != session.rect {
            self.session = Some(session.with_rect(rect));
            self.restore_source(session.rect);
            self.draw_overlay(rect);
        }
        self.redraw_preview();
    }

    /// Snapshot the preview for export. `None` until something has been
    /// previewed.
    pub fn begin_export(&self) -> Result<Option<ExportJob>> {
        match &self.preview {
            Some(preview) if self.previewed => Ok(Some(ExportJob {
                encoded: preview.snapshot()?,
            })),
            _ => Ok(None),
        }
    }

    /// Copy the previewed region into `target`. Returns false when there
    /// was nothing to export.
    pub fn export_to<T: DrawingSurface + ?Sized>(&self, target: &mut T) -> Result<bool> {
        match self.begin_export()? {
            Some(job) => {
                job.finish(target)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.session.map(|s| s.rect)
    }

    pub fn session(&self) -> Option<&CropSession> {
        self.session.as_ref()
    }

    pub fn mode(&self) -> InteractionMode {
        self.session.map(|s| s.mode).unwrap_or_default()
    }

    pub fn region(&self) -> Region {
        self.session.map(|s| s.region).unwrap_or_default()
    }

    pub fn cursor(&self) -> CursorToken {
        self.session.map(|s| s.cursor()).unwrap_or_default()
    }

    pub fn is_frame_scheduled(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn preview(&self) -> Option<&S> {
        self.preview.as_ref()
    }

    pub fn preview_mut(&mut self) -> Option<&mut S> {
        self.preview.as_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn scale(&self) -> Scale {
        Scale::from_sizes(self.surface.dimensions(), self.surface.rendered_size())
    }

    /// Paint the source image back over where the box used to be.
    fn restore_source(&mut self, old: CropRect) {
        if let Some(source) = &self.source {
            let area = old.inflate(self.config.restore_margin);
            self.surface.draw_region(source, area, area);
        }
    }

    fn draw_overlay(&mut self, rect: CropRect) {
        if let Some(overlay) = &self.overlay {
            let (w, h) = overlay.dimensions();
            self.surface.draw_region(
                overlay,
                PixelRect::from_size(w as f64, h as f64),
                rect.to_pixel_rect(),
            );
        }
    }

    fn redraw_preview(&mut self) {
        let (Some(preview), Some(source), Some(session)) =
            (self.preview.as_mut(), &self.source, self.session)
        else {
            return;
        };
        let (w, h) = preview.dimensions();
        let full = PixelRect::from_size(w as f64, h as f64);
        preview.clear_region(full);
        preview.draw_region(source, session.rect.to_pixel_rect(), full);
        self.previewed = true;
    }
}

/// A preview snapshot waiting to be decoded and copied out.
///
/// The job owns its bytes, so the decode can happen wherever the host
/// likes.
#[derive(Clone, Debug)]
pub struct ExportJob {
    encoded: EncodedImage,
}

impl ExportJob {
    pub fn encoded(&self) -> &EncodedImage {
        &self.encoded
    }

    /// Decode the snapshot and draw it at the target's origin at its
    /// natural size.
    pub fn finish<T: DrawingSurface + ?Sized>(self, target: &mut T) -> Result<()> {
        let bitmap = self.encoded.decode()?;
        let (w, h) = bitmap.dimensions();
        let full = PixelRect::from_size(w as f64, h as f64);
        target.draw_region(&bitmap, full, full);
        Ok(())
    }
}
