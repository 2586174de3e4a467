//! Window system backends
//!
//! The rest of the crate only talks to the window system through the
//! [`WindowBackend`] trait. A Win32 implementation is provided on Windows;
//! everywhere else, and on machines without an interactive desktop, the
//! [`NoOpBackend`] is selected so batch runs keep working.

pub mod noop;
#[cfg(windows)]
pub mod window;
#[cfg(windows)]
pub mod windows;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use thiserror::Error;

use crate::domain::core::Rect;

pub use noop::NoOpBackend;
#[cfg(windows)]
pub use self::windows::Win32Backend;

/// Opaque handle to a window owned by the window system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// Wraps a raw native handle
    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// Returns the raw native handle
    pub fn raw(&self) -> isize {
        self.0
    }
}

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Error types for window system operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No interactive window system is reachable
    #[error("window system unavailable: {reason}")]
    Unavailable { reason: String },

    /// Window handle no longer refers to a live window
    #[error("invalid window handle {0}")]
    InvalidHandle(WindowHandle),

    /// No window currently has focus
    #[error("no active window found")]
    NoActiveWindow,

    /// The window system rejected a request
    #[error("{operation} failed for window {handle}")]
    OperationFailed {
        operation: &'static str,
        handle: WindowHandle,
    },
}

/// Capabilities the measurer needs from a window system
///
/// Takes `&self` throughout: the state being changed lives on the
/// window-system side, behind the handles.
pub trait WindowBackend {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Returns true when windows can actually be shown
    fn is_interactive(&self) -> bool;

    /// Opens a visible, labelled probe window
    fn open_probe(&self, label: &str) -> Result<WindowHandle, BackendError>;

    /// Asks the window system to maximize a window
    fn maximize(&self, window: WindowHandle) -> Result<(), BackendError>;

    /// Reads a window's current outer geometry
    fn geometry(&self, window: WindowHandle) -> Result<Rect, BackendError>;

    /// Moves and resizes a window
    fn set_geometry(&self, window: WindowHandle, rect: Rect) -> Result<(), BackendError>;

    /// Returns the window that currently has focus
    fn active_window(&self) -> Result<WindowHandle, BackendError>;

    /// Closes a window previously opened with [`WindowBackend::open_probe`]
    fn close(&self, window: WindowHandle) -> Result<(), BackendError>;

    /// Yields to the window system's event loop for `delay`
    ///
    /// Geometry reads issued right after a resize can return stale values
    /// unless the window manager had a chance to process the request.
    fn settle(&self, delay: Duration);
}

impl<B: WindowBackend + ?Sized> WindowBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn open_probe(&self, label: &str) -> Result<WindowHandle, BackendError> {
        (**self).open_probe(label)
    }

    fn maximize(&self, window: WindowHandle) -> Result<(), BackendError> {
        (**self).maximize(window)
    }

    fn geometry(&self, window: WindowHandle) -> Result<Rect, BackendError> {
        (**self).geometry(window)
    }

    fn set_geometry(&self, window: WindowHandle, rect: Rect) -> Result<(), BackendError> {
        (**self).set_geometry(window, rect)
    }

    fn active_window(&self) -> Result<WindowHandle, BackendError> {
        (**self).active_window()
    }

    fn close(&self, window: WindowHandle) -> Result<(), BackendError> {
        (**self).close(window)
    }

    fn settle(&self, delay: Duration) {
        (**self).settle(delay)
    }
}

/// Selects the best backend for the current machine
///
/// Falls back to [`NoOpBackend`] when no interactive desktop is available.
pub fn default_backend() -> Box<dyn WindowBackend> {
    #[cfg(windows)]
    {
        let backend = Win32Backend::new();
        if backend.is_interactive() {
            log::debug!("Using {} window backend", backend.name());
            return Box::new(backend);
        }
        log::info!("No interactive desktop detected, window placement disabled");
    }

    #[cfg(not(windows))]
    log::info!("No window backend for this platform, window placement disabled");

    Box::new(NoOpBackend)
}
