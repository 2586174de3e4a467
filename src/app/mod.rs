//! Application layer
//!
//! Ties the pure grid geometry to a window backend: measuring the screen,
//! tracking measurement state, and placing windows at named positions.

pub mod manager;
pub mod measurer;
pub mod state;

pub use manager::FigureManager;
pub use measurer::{MeasureError, Placement, ScreenMeasurer};
pub use state::MeasureState;
