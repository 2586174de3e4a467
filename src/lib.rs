//! figman: place figure windows on a screen grid
//!
//! The screen area is measured once (or given explicitly), divided into an
//! `n_rows` x `n_cols` grid, and windows are moved into single cells either
//! by raw grid coordinates or by named presets such as `split_2x2.ul`.
//!
//! ```rust
//! use figman::app::FigureManager;
//! use figman::config::Settings;
//! use figman::domain::presets::Preset;
//! use figman::platform::NoOpBackend;
//!
//! let settings = Settings {
//!     screen: Some([0, 0, 1920, 1080]),
//!     ..Settings::default()
//! };
//! let manager = FigureManager::with_backend(NoOpBackend, &settings).unwrap();
//! let placement = manager.place(Preset::Right, None).unwrap();
//! assert_eq!(placement.rect().to_array(), [960, 0, 960, 1080]);
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod platform;
