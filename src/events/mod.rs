use serde::Serialize;

pub mod input;
pub mod resize;
pub mod window;

pub use input::{InputCollector, InputEvent, InputSnapshot};
pub use resize::{ResizeDispatcher, ResizeSlot, ResizeSubscription};
pub use window::{WindowResizeSource, current_viewport};

/// Viewport size at the instant a resize notification fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewportDimensions {
    pub width: u32,
    pub height: u32,
}

impl ViewportDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Converts the host's floating point CSS pixel sizes. Negative and
    /// non-finite values become 0.
    pub fn from_host(width: f64, height: f64) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }
}

fn clamp_dimension(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}
