//! Screen measurement and window placement
//!
//! [`ScreenMeasurer`] owns the measured screen rectangle. It can take the
//! rectangle verbatim, measure it by maximizing a throwaway probe window,
//! or measure a probe the user placed by hand. Grid cells are computed from
//! the stored rectangle and handed to the backend as move/resize requests.
//!
//! Placement is cosmetic: when the window system is missing or a handle has
//! gone stale, the request is logged and skipped instead of failing.

use std::time::Duration;

use thiserror::Error;

use crate::app::state::MeasureState;
use crate::config::{BorderAdjust, Settings};
use crate::domain::core::Rect;
use crate::domain::grid::{GridError, GridPosition};
use crate::platform::{BackendError, WindowBackend, WindowHandle};

/// Errors raised by measurement and grid operations
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] GridError),

    #[error("screen is not measured; set a screen rectangle or run a measurement first")]
    NotInitialized,

    #[error("window system unavailable: {0}")]
    ToolkitUnavailable(#[from] BackendError),

    #[error("no probe window is open")]
    ProbeNotOpen,
}

/// Outcome of a placement request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The window system accepted the move/resize
    Placed { window: WindowHandle, rect: Rect },
    /// The request was dropped; the reason has already been logged
    Skipped { rect: Rect, reason: BackendError },
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }

    pub fn rect(&self) -> Rect {
        match self {
            Placement::Placed { rect, .. } | Placement::Skipped { rect, .. } => *rect,
        }
    }
}

/// Closes a probe window when dropped
pub(crate) struct ProbeGuard<'a, B: WindowBackend + ?Sized> {
    backend: &'a B,
    probe: WindowHandle,
}

impl<'a, B: WindowBackend + ?Sized> ProbeGuard<'a, B> {
    pub(crate) fn new(backend: &'a B, probe: WindowHandle) -> Self {
        Self { backend, probe }
    }

    pub(crate) fn handle(&self) -> WindowHandle {
        self.probe
    }
}

impl<B: WindowBackend + ?Sized> Drop for ProbeGuard<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.close(self.probe) {
            log::warn!("Failed to close probe window {}: {}", self.probe, e);
        }
    }
}

/// Measures the usable screen area and places windows in grid cells
pub struct ScreenMeasurer<B: WindowBackend = Box<dyn WindowBackend>> {
    backend: B,
    state: MeasureState,
    settle_delay: Duration,
    border_adjust: BorderAdjust,
    probe_label: String,
}

impl<B: WindowBackend> ScreenMeasurer<B> {
    /// Creates an unmeasured measurer with default settings
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, &Settings::default())
    }

    /// Creates an unmeasured measurer using the timing and correction
    /// values from `settings`
    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            state: MeasureState::Unmeasured,
            settle_delay: settings.settle_delay(),
            border_adjust: settings.border_adjust,
            probe_label: settings.probe_label.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> MeasureState {
        self.state
    }

    /// Returns the rectangle grid cells are computed from, if any
    pub fn screen_rect(&self) -> Option<Rect> {
        self.state.screen_rect()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Replaces the stored screen rectangle
    ///
    /// Any probe window still open from a manual measurement is closed.
    pub fn set_screen_rect(&mut self, rect: Rect) -> Result<(), MeasureError> {
        rect.validate_screen()?;

        if let Some(probe) = self.state.probe() {
            drop(ProbeGuard::new(&self.backend, probe));
        }

        log::debug!("Screen rectangle set to {}", rect);
        self.state = MeasureState::Measured(rect);
        Ok(())
    }

    /// Measures the screen by maximizing a throwaway probe window
    ///
    /// Returns `Ok(None)` without touching the stored rectangle when there
    /// is no interactive display. The probe is closed on every path.
    pub fn auto_measure(&mut self) -> Result<Option<Rect>, MeasureError> {
        if let Some(probe) = self.state.probe() {
            drop(ProbeGuard::new(&self.backend, probe));
            self.state = self.state.abort();
        }

        if !self.backend.is_interactive() {
            log::info!("Non-interactive session, skipping screen measurement");
            return Ok(None);
        }

        let probe = match self.backend.open_probe(&self.probe_label) {
            Ok(probe) => probe,
            Err(BackendError::Unavailable { reason }) => {
                log::info!("Cannot open probe window ({}), skipping screen measurement", reason);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let guard = ProbeGuard::new(&self.backend, probe);
        self.state = self.state.begin(probe);

        let border_adjust = self.border_adjust;
        let result = read_maximized(&self.backend, guard.handle(), self.settle_delay)
            .map_err(MeasureError::from)
            .and_then(|raw| {
                let rect = border_adjust.apply(raw)?;
                rect.validate_screen()?;
                Ok((raw, rect))
            });

        drop(guard);

        match result {
            Ok((raw, rect)) => {
                log::info!("Measured screen {} (probe reported {})", rect, raw);
                self.state = MeasureState::Measured(rect);
                Ok(Some(rect))
            }
            Err(e) => {
                self.state = self.state.abort();
                Err(e)
            }
        }
    }

    /// Opens a probe window for manual measurement
    ///
    /// Move and resize the probe over the area to use, then call
    /// [`ScreenMeasurer::measure_from_open_probe`].
    pub fn open_probe(&mut self) -> Result<WindowHandle, MeasureError> {
        if let Some(previous) = self.state.probe() {
            drop(ProbeGuard::new(&self.backend, previous));
            self.state = self.state.abort();
        }

        let probe = self.backend.open_probe(&self.probe_label)?;
        self.backend.settle(self.settle_delay);
        self.state = self.state.begin(probe);

        log::info!("Probe window opened; move it into place, then measure it");
        Ok(probe)
    }

    /// Stores the open probe's current geometry verbatim and closes it
    pub fn measure_from_open_probe(&mut self) -> Result<Rect, MeasureError> {
        let probe = self.state.probe().ok_or(MeasureError::ProbeNotOpen)?;
        let guard = ProbeGuard::new(&self.backend, probe);

        self.backend.settle(self.settle_delay);
        let result = self
            .backend
            .geometry(guard.handle())
            .map_err(MeasureError::from)
            .and_then(|rect| {
                rect.validate_screen()?;
                Ok(rect)
            });

        drop(guard);

        match result {
            Ok(rect) => {
                log::info!("Measured probe at {}; reuse it with --screen {}", rect, rect);
                self.state = MeasureState::Measured(rect);
                Ok(rect)
            }
            Err(e) => {
                self.state = self.state.abort();
                Err(e)
            }
        }
    }

    /// Computes cell (`row`, `col`) of an `n_rows` x `n_cols` grid
    pub fn grid_cell(
        &self,
        n_rows: u32,
        n_cols: u32,
        row: u32,
        col: u32,
    ) -> Result<Rect, MeasureError> {
        let screen = self.screen_rect().ok_or(MeasureError::NotInitialized)?;
        let position = GridPosition::new(n_rows, n_cols, row, col)?;
        Ok(position.cell_rect(screen)?)
    }

    /// Computes the rectangle of an already validated grid position
    pub fn cell_for(&self, position: GridPosition) -> Result<Rect, MeasureError> {
        let screen = self.screen_rect().ok_or(MeasureError::NotInitialized)?;
        Ok(position.cell_rect(screen)?)
    }

    /// Moves and resizes `window`, or the active window when `None`
    ///
    /// Fails only with `NotInitialized` before a screen rect is known;
    /// backend errors are logged and reported as [`Placement::Skipped`].
    pub fn place_window(
        &self,
        rect: Rect,
        window: Option<WindowHandle>,
    ) -> Result<Placement, MeasureError> {
        self.screen_rect().ok_or(MeasureError::NotInitialized)?;
        self.backend.settle(self.settle_delay);

        let target = match window {
            Some(window) => Ok(window),
            None => self.backend.active_window(),
        };

        let result = target.and_then(|window| {
            self.backend.set_geometry(window, rect)?;
            Ok(window)
        });

        let placement = match result {
            Ok(window) => {
                log::debug!("Placed window {} at {}", window, rect);
                Placement::Placed { window, rect }
            }
            Err(reason) => {
                match &reason {
                    BackendError::Unavailable { .. } => {
                        log::debug!("Leaving window as is: {}", reason)
                    }
                    _ => log::warn!("Could not place window at {}: {}", rect, reason),
                }
                Placement::Skipped { rect, reason }
            }
        };
        Ok(placement)
    }

    /// Places a window in cell (`row`, `col`) of an `n_rows` x `n_cols` grid
    pub fn position(
        &self,
        n_rows: u32,
        n_cols: u32,
        row: u32,
        col: u32,
        window: Option<WindowHandle>,
    ) -> Result<Placement, MeasureError> {
        let rect = self.grid_cell(n_rows, n_cols, row, col)?;
        self.place_window(rect, window)
    }

    /// Places a window at an already validated grid position
    pub fn place_at(
        &self,
        position: GridPosition,
        window: Option<WindowHandle>,
    ) -> Result<Placement, MeasureError> {
        let rect = self.cell_for(position)?;
        self.place_window(rect, window)
    }
}

/// Maximizes `probe`, waits for the window manager, and reads it back
fn read_maximized<B: WindowBackend + ?Sized>(
    backend: &B,
    probe: WindowHandle,
    settle_delay: Duration,
) -> Result<Rect, BackendError> {
    backend.settle(settle_delay);
    backend.maximize(probe)?;
    backend.settle(settle_delay);
    backend.geometry(probe)
}
