use crate::controllers::interactive::events::render_event::RenderEvent;

/// Receives finished frames and render failures from the controller's worker thread.
pub trait InteractiveControllerPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
