use crate::cursor::{CursorToken, cursor_for};
use crate::geometry::{CropRect, ImageBounds, Scale, initial_rect};
use crate::hit_test::{Corner, Region};

/// The gesture currently in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Moving,
    Resizing(Corner),
}

impl InteractionMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, InteractionMode::Idle)
    }

    /// Pressing starts a gesture only from idle and only over a zone.
    pub fn on_pointer_down(self, region: Region) -> Self {
        match (self, region) {
            (InteractionMode::Idle, Region::Move) => InteractionMode::Moving,
            (InteractionMode::Idle, Region::Corner(corner)) => InteractionMode::Resizing(corner),
            (mode, _) => mode,
        }
    }

    /// Releasing anywhere ends whatever was in progress.
    pub fn on_pointer_up(self) -> Self {
        InteractionMode::Idle
    }
}

/// Everything that changes during one image's editing session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSession {
    pub bounds: ImageBounds,
    pub rect: CropRect,
    pub mode: InteractionMode,
    /// Hit-test result for the latest pointer position.
    pub region: Region,
    /// Scale measured on the latest pointer event.
    pub scale: Scale,
}

impl CropSession {
    pub fn new(bounds: ImageBounds, initial_fraction: f64) -> Self {
        Self {
            bounds,
            rect: initial_rect(bounds, initial_fraction),
            mode: InteractionMode::Idle,
            region: Region::None,
            scale: Scale::IDENTITY,
        }
    }

    pub fn cursor(&self) -> CursorToken {
        cursor_for(self.region, self.mode)
    }

    pub fn hovered(self, region: Region, scale: Scale) -> Self {
        Self {
            region,
            scale,
            ..self
        }
    }

    pub fn pressed(self, region: Region, scale: Scale) -> Self {
        Self {
            mode: self.mode.on_pointer_down(region),
            ..self.hovered(region, scale)
        }
    }

    pub fn released(self) -> Self {
        Self {
            mode: self.mode.on_pointer_up(),
            ..self
        }
    }

    pub fn with_rect(self, rect: CropRect) -> Self {
        Self { rect, ..self }
    }
}
