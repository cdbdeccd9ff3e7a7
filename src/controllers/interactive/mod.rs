//! Interactive controller for real-time fractal exploration.
//!
//! This module provides the application layer for interactive fractal exploration,
//! turning user actions into numbered render requests and dispatching results to
//! the presentation layer.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: `ViewAction` values validated by the `ViewportStateMachine`
//! - **Output**: `InteractiveControllerPresenterPort` receiving `RenderEvent`s
//! - **Persistence**: `BookmarkStore` for named views
//! - **Core**: Uses the `FractalEngine` from `core/` for actual computation

mod controller;
pub mod data;
pub mod errors;
pub mod events;
mod explorer;
pub mod ports;
pub mod state_machine;
pub mod types;

pub use controller::InteractiveController;
pub use explorer::FractalExplorer;
pub use state_machine::{Completion, ViewLimits, ViewState, ViewportStateMachine, ViewportStatus};
pub use types::{PanDirection, RenderRequest, ViewAction};
