use std::sync::mpsc::Sender;

use log::debug;

use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;

/// Forwards render events to whoever owns the receiving end, typically the
/// thread driving the viewport state machine.
pub struct ChannelPresenter {
    sender: Sender<RenderEvent>,
}

impl ChannelPresenter {
    pub fn new(sender: Sender<RenderEvent>) -> Self {
        Self { sender }
    }
}

impl InteractiveControllerPresenterPort for ChannelPresenter {
    fn present(&self, event: RenderEvent) {
        let generation = event.generation();
        if self.sender.send(event).is_err() {
            debug!("receiver gone, dropping event for generation {}", generation);
        }
    }
}
