use crate::config::DeltaSourceKind;

/// One pointer event as reported by the host.
///
/// `offset_*` is surface-local in client pixels, `movement_*` is the delta
/// since the previous event, `client_*` is the absolute viewport position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub offset_x: f64,
    pub offset_y: f64,
    pub movement_x: f64,
    pub movement_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerSample {
    /// A sample at a surface-local position with no movement, where the
    /// surface sits at the viewport origin.
    pub fn at(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            client_x: offset_x,
            client_y: offset_y,
            ..Default::default()
        }
    }

    pub fn with_movement(mut self, movement_x: f64, movement_y: f64) -> Self {
        self.movement_x = movement_x;
        self.movement_y = movement_y;
        self
    }

    pub fn with_client(mut self, client_x: f64, client_y: f64) -> Self {
        self.client_x = client_x;
        self.client_y = client_y;
        self
    }
}

/// Produces the per-event pointer delta that drives a resize.
pub trait PointerDeltaSource {
    fn delta(&mut self, sample: &PointerSample) -> (f64, f64);

    /// Forget any history. Called when a gesture starts or a session is
    /// replaced.
    fn reset(&mut self) {}
}

/// Trusts the input source's own movement fields.
#[derive(Debug, Default)]
pub struct NativeDelta;

impl PointerDeltaSource for NativeDelta {
    fn delta(&mut self, sample: &PointerSample) -> (f64, f64) {
        (sample.movement_x, sample.movement_y)
    }
}

/// Derives the delta from consecutive absolute client positions.
///
/// The first sample after a reset has nothing to diff against and reports
/// zero. When the absolute positions did not change but the native
/// movement did, the axis is nudged by one pixel in the movement's
/// direction so slow drags never stall.
#[derive(Debug, Default)]
pub struct AbsoluteDelta {
    last: Option<(f64, f64)>,
}

impl AbsoluteDelta {
    fn axis(velocity: f64, movement: f64) -> f64 {
        if velocity == 0.0 && movement != 0.0 {
            movement.signum()
        } else {
            velocity
        }
    }
}

impl PointerDeltaSource for AbsoluteDelta {
    fn delta(&mut self, sample: &PointerSample) -> (f64, f64) {
        let (vx, vy) = match self.last {
            Some((lx, ly)) => (sample.client_x - lx, sample.client_y - ly),
            None => (0.0, 0.0),
        };
        self.last = Some((sample.client_x, sample.client_y));
        (
            Self::axis(vx, sample.movement_x),
            Self::axis(vy, sample.movement_y),
        )
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

pub fn delta_source(kind: DeltaSourceKind) -> Box<dyn PointerDeltaSource> {
    match kind {
        DeltaSourceKind::Native => Box::new(NativeDelta),
        DeltaSourceKind::FromAbsolute => Box::new(AbsoluteDelta::default()),
    }
}
