pub mod config;
pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use crate::config::{ConfigError, ExplorerConfig, ExplorerSettings};
pub use crate::controllers::cli::snapshot::SnapshotController;
pub use crate::controllers::interactive::errors::explorer_error::ExplorerError;
pub use crate::controllers::interactive::{
    Completion, FractalExplorer, InteractiveController, PanDirection, RenderRequest, ViewAction,
    ViewLimits, ViewState, ViewportStateMachine, ViewportStatus,
};
pub use crate::core::engine::{FractalEngine, RenderJob, RenderedFrame};
pub use crate::core::errors::InvalidParameterError;
pub use crate::presenters::channel::ChannelPresenter;
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::storage::json_bookmark_store::JsonBookmarkStore;
pub use crate::storage::memory_bookmark_store::MemoryBookmarkStore;
