//! Square crop-box selection over a raster image.
//!
//! A [`CropEngine`] owns one square crop box per image. Hosts feed it pointer
//! events (directly or through an [`InputPort`]), deliver paint frames
//! through a [`FrameClock`], and read back the crop rectangle, the cursor to
//! show, and the rendered preview.
//!
//! ```no_run
//! use square_cropper::{CropEngine, EngineConfig, PointerSample, QueuedClock, RasterSurface};
//!
//! let image = image::open("photo.jpg").unwrap().to_rgba8();
//! let mut engine = CropEngine::new(RasterSurface::new(1, 1), QueuedClock::default(), EngineConfig::default());
//! engine.init(image, None, None);
//! engine.enable_drag(Some(RasterSurface::new(256, 256)));
//! engine.enable_resize();
//!
//! engine.pointer_down(&PointerSample::at(120.0, 120.0));
//! engine.pointer_move(&PointerSample::at(140.0, 130.0).with_movement(20.0, 10.0));
//! for frame in engine.clock_mut().take_due() {
//!     engine.run_frame(frame);
//! }
//! engine.pointer_up();
//! println!("{:?}", engine.crop_rect());
//! ```

mod config;
mod cursor;
mod drag;
mod engine;
mod error;
mod geometry;
mod hit_test;
mod input;
mod pointer;
mod resize;
mod scheduler;
mod session;
mod surface;

pub use config::{DeltaSourceKind, EngineConfig};
pub use cursor::{CursorToken, cursor_for};
pub use drag::apply_move;
pub use engine::{CropEngine, ExportJob};
pub use error::{CropperError, Result};
pub use geometry::{CropRect, ImageBounds, PixelRect, Scale, clamp_origin, initial_rect};
pub use hit_test::{Corner, HitTester, Region};
pub use input::{InputEvent, InputPort, Subscription, SubscriptionId};
pub use pointer::{AbsoluteDelta, NativeDelta, PointerDeltaSource, PointerSample, delta_source};
pub use resize::ResizeEngine;
pub use scheduler::{FrameClock, FrameHandle, FrameScheduler, QueuedClock, ScheduledSample};
pub use session::{CropSession, InteractionMode};
pub use surface::{DrawingSurface, EncodedImage, RasterSurface};
