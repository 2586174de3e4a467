//! Backend for headless and unsupported environments
//!
//! Every request reports [`BackendError::Unavailable`], which the measurer
//! treats as "skip and continue".

use std::time::Duration;

use crate::domain::core::Rect;
use crate::platform::{BackendError, WindowBackend, WindowHandle};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpBackend;

impl NoOpBackend {
    fn unavailable<T>() -> Result<T, BackendError> {
        Err(BackendError::Unavailable {
            reason: "no interactive window system".to_string(),
        })
    }
}

impl WindowBackend for NoOpBackend {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn open_probe(&self, _label: &str) -> Result<WindowHandle, BackendError> {
        Self::unavailable()
    }

    fn maximize(&self, _window: WindowHandle) -> Result<(), BackendError> {
        Self::unavailable()
    }

    fn geometry(&self, _window: WindowHandle) -> Result<Rect, BackendError> {
        Self::unavailable()
    }

    fn set_geometry(&self, _window: WindowHandle, _rect: Rect) -> Result<(), BackendError> {
        Self::unavailable()
    }

    fn active_window(&self) -> Result<WindowHandle, BackendError> {
        Self::unavailable()
    }

    fn close(&self, _window: WindowHandle) -> Result<(), BackendError> {
        // Nothing was ever opened
        Ok(())
    }

    fn settle(&self, _delay: Duration) {}
}
