//! Measurer state machine
//!
//! `Unmeasured -> Measuring -> Measured`, and `Measured -> Measuring` again
//! on re-measurement. The stored rect is a `Copy` value and every transition
//! replaces the whole state, so readers never see half of an update.

use crate::domain::core::Rect;
use crate::platform::WindowHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureState {
    /// No screen rectangle known yet
    #[default]
    Unmeasured,
    /// A probe window is open; `previous` is the rect from before, if any
    Measuring {
        probe: WindowHandle,
        previous: Option<Rect>,
    },
    /// Screen rectangle is known
    Measured(Rect),
}

impl MeasureState {
    /// Returns the rectangle usable for grid computations
    ///
    /// While re-measuring, the previous measurement stays in effect.
    pub fn screen_rect(&self) -> Option<Rect> {
        match *self {
            MeasureState::Unmeasured => None,
            MeasureState::Measuring { previous, .. } => previous,
            MeasureState::Measured(rect) => Some(rect),
        }
    }

    /// Returns the open probe window, if any
    pub fn probe(&self) -> Option<WindowHandle> {
        match *self {
            MeasureState::Measuring { probe, .. } => Some(probe),
            _ => None,
        }
    }

    /// Enters `Measuring` with a freshly opened probe
    pub fn begin(self, probe: WindowHandle) -> Self {
        MeasureState::Measuring {
            probe,
            previous: self.screen_rect(),
        }
    }

    /// Leaves `Measuring` without a new measurement
    pub fn abort(self) -> Self {
        match self.screen_rect() {
            Some(rect) => MeasureState::Measured(rect),
            None => MeasureState::Unmeasured,
        }
    }
}
