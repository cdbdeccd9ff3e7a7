use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::controllers::interactive::controller::InteractiveController;
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::explorer_error::ExplorerError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::bookmark_store::BookmarkStore;
use crate::controllers::interactive::state_machine::{
    Completion, ViewState, ViewportStateMachine, ViewportStatus,
};
use crate::controllers::interactive::types::ViewAction;
use crate::core::data::bookmark::{Bookmark, BookmarkKey};
use crate::core::engine::FractalEngine;
use crate::presenters::channel::ChannelPresenter;

/// Ties the viewport state machine to the background controller and a
/// bookmark store. Lives on the thread that handles user input.
pub struct FractalExplorer<S: BookmarkStore> {
    state: ViewportStateMachine,
    controller: InteractiveController,
    events: Receiver<RenderEvent>,
    bookmarks: S,
}

impl<S: BookmarkStore> FractalExplorer<S> {
    pub fn new(
        home: ViewState,
        engine: Arc<FractalEngine>,
        bookmarks: S,
    ) -> Result<Self, ExplorerError> {
        let state = ViewportStateMachine::new(home)?;
        let (sender, events) = mpsc::channel();
        let controller =
            InteractiveController::new(engine, Arc::new(ChannelPresenter::new(sender)))?;

        Ok(Self {
            state,
            controller,
            events,
            bookmarks,
        })
    }

    #[must_use]
    pub fn state(&self) -> &ViewportStateMachine {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> Option<Arc<FrameData>> {
        self.state.frame()
    }

    /// Applies `action` and queues its render, returning the new generation.
    pub fn handle(&mut self, action: ViewAction) -> Result<u64, ExplorerError> {
        let request = self.state.apply(action)?;
        let generation = request.generation;
        self.controller.submit_request(request);

        Ok(generation)
    }

    /// Feeds every event that has already arrived into the state machine
    /// without blocking. Returns how many frames were presented.
    pub fn poll(&mut self) -> usize {
        let mut presented = 0;

        while let Ok(event) = self.events.try_recv() {
            if self.state.complete(event) == Completion::Presented {
                presented += 1;
            }
        }

        presented
    }

    /// Blocks until the latest generation finishes or `timeout` passes,
    /// returning the status at that point.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> ViewportStatus {
        let deadline = Instant::now() + timeout;

        while matches!(self.state.status(), ViewportStatus::Computing { .. }) {
            let remaining = deadline.saturating_duration_since(Instant::now());

            match self.events.recv_timeout(remaining) {
                Ok(event) => {
                    self.state.complete(event);
                }
                Err(RecvTimeoutError::Timeout) => {
                    debug!("still computing after {:?}", timeout);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.state.status().clone()
    }

    /// Stores the current view under `name`, replacing any bookmark with that name.
    pub fn save_bookmark(&mut self, name: &str) -> Result<Bookmark, ExplorerError> {
        let bookmark = self.state.snapshot_bookmark(name, unix_now());
        self.bookmarks.save(bookmark.clone())?;

        info!("bookmarked \"{}\" at zoom {:.3e}", name, bookmark.zoom_level);
        Ok(bookmark)
    }

    /// Restores a stored view. A failed lookup leaves the view untouched.
    pub fn load_bookmark(&mut self, key: &BookmarkKey) -> Result<u64, ExplorerError> {
        let bookmark = self.bookmarks.load(key)?;
        self.handle(ViewAction::LoadBookmark(bookmark))
    }

    pub fn delete_bookmark(&mut self, key: &BookmarkKey) -> Result<Bookmark, ExplorerError> {
        Ok(self.bookmarks.delete(key)?)
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>, ExplorerError> {
        Ok(self.bookmarks.list()?)
    }

    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    use crate::controllers::interactive::ports::bookmark_store::BookmarkError;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use crate::core::data::complex::Complex;
    use crate::core::data::fractal_params::{FractalFamily, FractalParameters};
    use crate::core::data::iteration_policy::IterationPolicy;
    use crate::core::data::plane_region::PlaneRegion;
    use crate::core::data::point::Point;
    use crate::core::data::viewport_size::ViewportSize;
    use crate::core::errors::InvalidParameterError;
    use crate::core::fractals::escape_time::EscapeTimeKernel;
    use crate::core::themes::theme::Theme;
    use crate::core::util::pixel_to_complex_coords::PlaneMapping;
    use crate::storage::memory_bookmark_store::MemoryBookmarkStore;

    const SETTLE: Duration = Duration::from_secs(10);

    fn home(width: u32, height: u32) -> ViewState {
        ViewState {
            size: ViewportSize::new(width, height).unwrap(),
            region: PlaneRegion::new(-2.0, 1.0, -1.5, 1.5).unwrap(),
            params: FractalParameters::new(FractalFamily::Mandelbrot, 50).unwrap(),
            theme: Theme::Default,
            theme_seed: 3,
            iteration_policy: IterationPolicy::Fixed,
            julia_constant: Complex::new(-0.7, 0.27015),
            fatou_exponent: 3,
        }
    }

    fn explorer(width: u32, height: u32) -> FractalExplorer<MemoryBookmarkStore> {
        let engine = Arc::new(FractalEngine::new(NonZeroUsize::new(4).unwrap()).unwrap());
        FractalExplorer::new(home(width, height), engine, MemoryBookmarkStore::new()).unwrap()
    }

    #[test_log::test]
    fn four_by_four_frame_matches_serial_reference() {
        let mut explorer = explorer(4, 4);

        explorer.handle(ViewAction::Redraw).unwrap();
        let status = explorer.wait_until_settled(SETTLE);

        assert_eq!(status, ViewportStatus::Idle);
        let frame = explorer.frame().unwrap();
        let region = explorer.state().view().region;
        let kernel = EscapeTimeKernel::new(&explorer.state().view().params);
        let reference =
            generate_fractal_serial(&PlaneMapping::new(region, ViewportSize::new(4, 4).unwrap()), &kernel)
                .unwrap();
        assert_eq!(frame.iterations, reference);
        explorer.shutdown();
    }

    #[test_log::test]
    fn superseded_request_is_never_the_displayed_frame() {
        let mut explorer = explorer(256, 192);

        explorer.handle(ViewAction::Redraw).unwrap();
        explorer
            .handle(ViewAction::ZoomAt {
                anchor: Some(Point { x: 64, y: 96 }),
                factor: 0.5,
            })
            .unwrap();
        let latest = explorer.handle(ViewAction::CycleTheme).unwrap();

        let status = explorer.wait_until_settled(SETTLE);

        assert_eq!(status, ViewportStatus::Idle);
        assert_eq!(explorer.frame().map(|f| f.generation), Some(latest));
        explorer.shutdown();
    }

    #[test]
    fn rejected_action_does_not_submit() {
        let mut explorer = explorer(8, 8);

        let err = explorer
            .handle(ViewAction::SelectTheme("Neon".to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            ExplorerError::InvalidParameter(InvalidParameterError::UnknownTheme(_))
        ));
        assert_eq!(explorer.state().generation(), 0);
        assert_eq!(explorer.poll(), 0);
        explorer.shutdown();
    }

    #[test]
    fn bookmarks_round_trip_through_the_store() {
        let mut explorer = explorer(16, 16);
        explorer
            .handle(ViewAction::ZoomAt {
                anchor: Some(Point { x: 4, y: 4 }),
                factor: 0.25,
            })
            .unwrap();
        let saved = explorer.save_bookmark("corner").unwrap();
        explorer.handle(ViewAction::Reset).unwrap();

        explorer
            .load_bookmark(&BookmarkKey::Name("corner".to_string()))
            .unwrap();

        assert_eq!(explorer.state().view().region, saved.region);
        assert_eq!(explorer.bookmarks().unwrap(), vec![saved]);
        explorer.shutdown();
    }

    #[test]
    fn missing_bookmark_leaves_view_unchanged() {
        let mut explorer = explorer(16, 16);
        let before = explorer.state().view().clone();

        let err = explorer.load_bookmark(&BookmarkKey::Index(0)).unwrap_err();

        assert!(matches!(
            err,
            ExplorerError::Bookmark(BookmarkError::NotFound(BookmarkKey::Index(0)))
        ));
        assert_eq!(explorer.state().view(), &before);
        explorer.shutdown();
    }

    #[test]
    fn delete_bookmark_removes_it() {
        let mut explorer = explorer(16, 16);
        explorer.save_bookmark("home").unwrap();

        let removed = explorer
            .delete_bookmark(&BookmarkKey::Name("home".to_string()))
            .unwrap();

        assert_eq!(removed.name, "home");
        assert!(explorer.bookmarks().unwrap().is_empty());
        explorer.shutdown();
    }
}
