//! Scripted in-memory backend for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::core::Rect;
use crate::platform::{BackendError, WindowBackend, WindowHandle};

/// Every call the measurer made, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenProbe(String),
    Maximize(WindowHandle),
    Geometry(WindowHandle),
    SetGeometry(WindowHandle, Rect),
    ActiveWindow,
    Close(WindowHandle),
    Settle,
}

/// Fake window system with one monitor
///
/// Maximizing a window sets its geometry to `maximized`.
#[derive(Debug)]
pub struct FakeBackend {
    pub maximized: Rect,
    pub interactive: bool,
    pub fail_geometry: bool,
    pub active: Option<WindowHandle>,
    windows: RefCell<HashMap<WindowHandle, Rect>>,
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<isize>,
}

impl FakeBackend {
    pub fn new(maximized: Rect) -> Self {
        let active = WindowHandle::from_raw(1);
        let mut windows = HashMap::new();
        windows.insert(active, Rect::new(100, 100, 640, 480));

        Self {
            maximized,
            interactive: true,
            fail_geometry: false,
            active: Some(active),
            windows: RefCell::new(windows),
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(100),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn open_windows(&self) -> usize {
        self.windows.borrow().len()
    }

    pub fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        self.windows.borrow().get(&window).copied()
    }

    /// Simulates the user dragging a window
    pub fn move_by_user(&self, window: WindowHandle, rect: Rect) {
        self.windows.borrow_mut().insert(window, rect);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn live(&self, window: WindowHandle) -> Result<(), BackendError> {
        if self.windows.borrow().contains_key(&window) {
            Ok(())
        } else {
            Err(BackendError::InvalidHandle(window))
        }
    }
}

impl WindowBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn open_probe(&self, label: &str) -> Result<WindowHandle, BackendError> {
        self.record(Call::OpenProbe(label.to_string()));
        if !self.interactive {
            return Err(BackendError::Unavailable {
                reason: "fake display is off".to_string(),
            });
        }

        let handle = WindowHandle::from_raw(self.next_handle.get());
        self.next_handle.set(self.next_handle.get() + 1);
        self.windows
            .borrow_mut()
            .insert(handle, Rect::new(200, 200, 640, 480));
        Ok(handle)
    }

    fn maximize(&self, window: WindowHandle) -> Result<(), BackendError> {
        self.record(Call::Maximize(window));
        self.live(window)?;
        self.windows.borrow_mut().insert(window, self.maximized);
        Ok(())
    }

    fn geometry(&self, window: WindowHandle) -> Result<Rect, BackendError> {
        self.record(Call::Geometry(window));
        self.live(window)?;
        if self.fail_geometry {
            return Err(BackendError::OperationFailed {
                operation: "geometry",
                handle: window,
            });
        }
        Ok(self.windows.borrow()[&window])
    }

    fn set_geometry(&self, window: WindowHandle, rect: Rect) -> Result<(), BackendError> {
        self.record(Call::SetGeometry(window, rect));
        self.live(window)?;
        self.windows.borrow_mut().insert(window, rect);
        Ok(())
    }

    fn active_window(&self) -> Result<WindowHandle, BackendError> {
        self.record(Call::ActiveWindow);
        self.active.ok_or(BackendError::NoActiveWindow)
    }

    fn close(&self, window: WindowHandle) -> Result<(), BackendError> {
        self.record(Call::Close(window));
        self.windows
            .borrow_mut()
            .remove(&window)
            .map(|_| ())
            .ok_or(BackendError::InvalidHandle(window))
    }

    fn settle(&self, _delay: Duration) {
        self.record(Call::Settle);
    }
}
