use crate::hit_test::{Corner, Region};
use crate::session::InteractionMode;

/// Symbolic cursor the host should show. Rendering it is the host's job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorToken {
    #[default]
    Default,
    Move,
    NwseResize,
    NeswResize,
}

impl CursorToken {
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorToken::Default => "default",
            CursorToken::Move => "move",
            CursorToken::NwseResize => "nwse-resize",
            CursorToken::NeswResize => "nesw-resize",
        }
    }
}

fn corner_cursor(corner: Corner) -> CursorToken {
    match corner {
        Corner::TopLeft | Corner::BottomRight => CursorToken::NwseResize,
        Corner::TopRight | Corner::BottomLeft => CursorToken::NeswResize,
    }
}

/// An active gesture holds its cursor even when the pointer leaves the zone
/// that started it.
pub fn cursor_for(region: Region, mode: InteractionMode) -> CursorToken {
    match mode {
        InteractionMode::Moving => CursorToken::Move,
        InteractionMode::Resizing(corner) => corner_cursor(corner),
        InteractionMode::Idle => match region {
            Region::None => CursorToken::Default,
            Region::Move => CursorToken::Move,
            Region::Corner(corner) => corner_cursor(corner),
        },
    }
}
