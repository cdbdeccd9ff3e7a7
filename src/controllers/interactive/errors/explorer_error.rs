use std::error::Error;
use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::ports::bookmark_store::BookmarkError;
use crate::core::actions::generate_fractal::worker_pool::WorkerPoolError;
use crate::core::errors::InvalidParameterError;

#[derive(Debug)]
pub enum ExplorerError {
    InvalidParameter(InvalidParameterError),
    Render(RenderError),
    Bookmark(BookmarkError),
    Startup(WorkerPoolError),
    Spawn(io::Error),
    Config(ConfigError),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(err) => write!(f, "invalid parameter: {}", err),
            Self::Render(err) => write!(f, "{}", err),
            Self::Bookmark(err) => write!(f, "{}", err),
            Self::Startup(err) => write!(f, "failed to start render engine: {}", err),
            Self::Spawn(err) => write!(f, "failed to start render thread: {}", err),
            Self::Config(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParameter(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Bookmark(err) => Some(err),
            Self::Startup(err) => Some(err),
            Self::Spawn(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<InvalidParameterError> for ExplorerError {
    fn from(err: InvalidParameterError) -> Self {
        Self::InvalidParameter(err)
    }
}

impl From<RenderError> for ExplorerError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<BookmarkError> for ExplorerError {
    fn from(err: BookmarkError) -> Self {
        Self::Bookmark(err)
    }
}

impl From<WorkerPoolError> for ExplorerError {
    fn from(err: WorkerPoolError) -> Self {
        Self::Startup(err)
    }
}

impl From<ConfigError> for ExplorerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<io::Error> for ExplorerError {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}
