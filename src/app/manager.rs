//! Figure manager: named positions on top of the screen measurer
//!
//! The manager is built once from [`Settings`]: an explicit screen
//! rectangle wins, otherwise the screen is measured with a probe window if
//! `auto_measure` is set. A failed measurement is logged and leaves the
//! manager unmeasured; placement then reports `NotInitialized`.

use std::time::Duration;

use crate::app::measurer::{MeasureError, Placement, ProbeGuard, ScreenMeasurer};
use crate::config::Settings;
use crate::domain::core::Rect;
use crate::domain::presets::Preset;
use crate::platform::{self, BackendError, WindowBackend, WindowHandle};

pub struct FigureManager<B: WindowBackend = Box<dyn WindowBackend>> {
    measurer: ScreenMeasurer<B>,
}

impl FigureManager {
    /// Builds a manager on the default backend for this machine
    pub fn from_settings(settings: &Settings) -> Result<Self, MeasureError> {
        Self::with_backend(platform::default_backend(), settings)
    }
}

impl<B: WindowBackend> FigureManager<B> {
    pub fn with_backend(backend: B, settings: &Settings) -> Result<Self, MeasureError> {
        let mut measurer = ScreenMeasurer::with_settings(backend, settings);

        if let Some(rect) = settings.screen_rect() {
            measurer.set_screen_rect(rect)?;
        } else if settings.auto_measure {
            match measurer.auto_measure() {
                Ok(Some(_)) => {}
                Ok(None) => log::debug!("Screen left unmeasured"),
                Err(e) => log::warn!("Screen measurement failed: {}", e),
            }
        }

        Ok(Self { measurer })
    }

    pub fn measurer(&self) -> &ScreenMeasurer<B> {
        &self.measurer
    }

    pub fn measurer_mut(&mut self) -> &mut ScreenMeasurer<B> {
        &mut self.measurer
    }

    pub fn screen_rect(&self) -> Option<Rect> {
        self.measurer.screen_rect()
    }

    /// Places `window` (or the active window) at a named position
    pub fn place(
        &self,
        preset: Preset,
        window: Option<WindowHandle>,
    ) -> Result<Placement, MeasureError> {
        self.measurer.place_at(preset.position(), window)
    }

    /// Places `window` (or the active window) in an arbitrary grid cell
    pub fn position(
        &self,
        n_rows: u32,
        n_cols: u32,
        row: u32,
        col: u32,
        window: Option<WindowHandle>,
    ) -> Result<Placement, MeasureError> {
        self.measurer.position(n_rows, n_cols, row, col, window)
    }

    /// Names accepted by [`Preset::from_str`](std::str::FromStr)
    pub fn possible_positions(&self) -> Vec<&'static str> {
        Preset::names()
    }

    /// Opens one labelled probe per preset, places each, and closes them
    /// all after `hold`
    ///
    /// Returns how many probes were actually placed.
    pub fn test_all_positions(&self, hold: Duration) -> Result<usize, MeasureError> {
        // Fail before opening anything
        if self.measurer.screen_rect().is_none() {
            return Err(MeasureError::NotInitialized);
        }

        let backend = self.measurer.backend();
        let mut probes = Vec::with_capacity(Preset::ALL.len());
        let mut placed = 0;

        for preset in Preset::ALL {
            let probe = match backend.open_probe(preset.name()) {
                Ok(probe) => ProbeGuard::new(backend, probe),
                Err(BackendError::Unavailable { reason }) => {
                    log::info!("Cannot open windows ({}), nothing to show", reason);
                    return Ok(placed);
                }
                Err(e) => return Err(e.into()),
            };
            if self.place(preset, Some(probe.handle()))?.is_placed() {
                placed += 1;
            }
            probes.push(probe);
        }

        log::info!("Showing {} of {} positions", placed, Preset::ALL.len());
        backend.settle(hold);

        Ok(placed)
    }
}
