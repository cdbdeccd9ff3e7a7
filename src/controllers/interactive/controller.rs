use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::controllers::interactive::types::RenderRequest;
use crate::core::actions::cancellation::GenerationToken;
use crate::core::engine::{EngineError, FractalEngine};
use log::{debug, error};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

struct SharedState {
    latest_generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<RenderRequest>>,
    wake: Condvar,
    shutdown: AtomicBool,
    engine: Arc<FractalEngine>,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Runs render requests on a background thread, newest first.
///
/// Only the latest submitted request is kept; older queued ones are dropped
/// and a running one is cancelled once a newer generation arrives. Stale
/// results are never presented.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        engine: Arc<FractalEngine>,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> io::Result<Self> {
        Self::spawn(
            thread::Builder::new().name("render-coordinator".to_string()),
            engine,
            presenter_port,
        )
    }

    fn spawn(
        builder: thread::Builder,
        engine: Arc<FractalEngine>,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> io::Result<Self> {
        let shared = Arc::new(SharedState {
            latest_generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            engine,
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = builder
            .spawn(move || {
                Self::worker_loop(&worker_shared);
            })
            .inspect_err(|err| error!("failed to spawn render coordinator thread: {}", err))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queues `request`, superseding anything older. Returns `false` if a
    /// newer generation was already submitted.
    pub fn submit_request(&self, request: RenderRequest) -> bool {
        let generation = request.generation;

        {
            // The generation only moves while the slot is held, so a slower
            // submitter can never put an older request over a newer one.
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let latest = self.shared.latest_generation.load(Ordering::Acquire);
            if generation < latest {
                debug!("ignoring request {} behind generation {}", generation, latest);
                return false;
            }

            self.shared
                .latest_generation
                .store(generation, Ordering::Release);
            if let Some(replaced) = guard.replace(request) {
                debug!("request {} superseded before starting", replaced.generation);
            }
        }

        self.shared.wake.notify_one();

        true
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let request = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let job_generation = request.generation;
            let cancel_token = GenerationToken::new(
                job_generation,
                &shared.latest_generation,
                &shared.shutdown,
            );

            let result = shared.engine.render(&request.job, &cancel_token);

            let event = match result {
                Ok(frame) => RenderEvent::Frame(FrameData {
                    generation: job_generation,
                    pixel_buffer: frame.pixel_buffer,
                    iterations: frame.iterations,
                    assignment: frame.assignment,
                    render_duration: frame.render_duration,
                }),
                Err(EngineError::Cancelled(_)) => {
                    debug!("render {} cancelled", job_generation);
                    continue;
                }
                Err(err) => {
                    let section = match &err {
                        EngineError::WorkerFailure { section, .. } => Some(*section),
                        _ => None,
                    };
                    error!("render {} failed: {}", job_generation, err);

                    RenderEvent::Error(RenderError {
                        generation: job_generation,
                        section,
                        message: err.to_string(),
                    })
                }
            };

            if job_generation != shared.latest_generation.load(Ordering::Acquire) {
                debug!("discarding stale result for generation {}", job_generation);
                continue;
            }

            shared.presenter_port.present(event);

            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use std::time::{Duration, Instant};

    use crate::core::data::fractal_params::{FractalFamily, FractalParameters};
    use crate::core::data::plane_region::PlaneRegion;
    use crate::core::data::viewport_size::ViewportSize;
    use crate::core::engine::RenderJob;
    use crate::core::themes::theme::Theme;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for_events(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        loop {
            let events = sink.take_events();
            if !events.is_empty() {
                return events;
            }
            if start.elapsed() >= timeout {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn engine() -> Arc<FractalEngine> {
        Arc::new(FractalEngine::new(NonZeroUsize::new(2).unwrap()).unwrap())
    }

    fn create_controller() -> (InteractiveController, Arc<MockPresenterPort>) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = InteractiveController::new(
            engine(),
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
        .unwrap();
        (controller, presenter_port)
    }

    fn create_test_request(generation: u64, width: u32, height: u32) -> RenderRequest {
        RenderRequest {
            generation,
            job: RenderJob {
                size: ViewportSize::new(width, height).unwrap(),
                region: PlaneRegion::new(-2.5, 1.0, -1.0, 1.0).unwrap(),
                params: FractalParameters::new(FractalFamily::Mandelbrot, 10).unwrap(),
                theme: Theme::Default,
                theme_seed: 0,
            },
        }
    }

    #[test]
    fn test_submit_request_emits_frame() {
        let (mut controller, presenter_port) = create_controller();

        assert!(controller.submit_request(create_test_request(1, 4, 4)));
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        let mut saw_frame = false;
        for event in events {
            match event {
                RenderEvent::Frame(frame) => {
                    assert_eq!(frame.generation, 1);
                    assert_eq!(frame.pixel_buffer.buffer().len(), 4 * 4 * 3);
                    saw_frame = true;
                }
                RenderEvent::Error(error) => {
                    panic!("unexpected render error: {}", error.message);
                }
            }
        }

        assert!(saw_frame, "expected a frame event");
        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_starts_at_zero() {
        let (mut controller, _presenter_port) = create_controller();

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_updates_after_frame_completion() {
        let (mut controller, presenter_port) = create_controller();

        controller.submit_request(create_test_request(7, 4, 4));
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        assert_eq!(events[0].generation(), 7);
        assert_eq!(controller.last_completed_generation(), 7);

        controller.shutdown();
    }

    #[test]
    fn test_older_generation_is_refused() {
        let (mut controller, _presenter_port) = create_controller();

        assert!(controller.submit_request(create_test_request(5, 4, 4)));
        assert!(!controller.submit_request(create_test_request(4, 4, 4)));

        controller.shutdown();
    }

    #[test]
    fn test_rapid_requests_only_present_newest() {
        let (mut controller, presenter_port) = create_controller();

        for generation in 1..=5 {
            controller.submit_request(create_test_request(generation, 200, 150));
        }

        let start = Instant::now();
        let mut events = Vec::new();
        while controller.last_completed_generation() != 5
            && start.elapsed() < Duration::from_secs(5)
        {
            thread::sleep(Duration::from_millis(10));
        }
        events.extend(presenter_port.take_events());

        assert!(!events.is_empty(), "expected the newest frame");
        for event in &events {
            match event {
                RenderEvent::Frame(frame) => assert!(frame.generation <= 5),
                RenderEvent::Error(err) => {
                    panic!("cancellation must not surface as an error: {}", err.message)
                }
            }
        }
        assert_eq!(events.last().map(RenderEvent::generation), Some(5));

        controller.shutdown();
    }

    #[test]
    fn test_concurrent_submitters_leave_newest_rendered() {
        let (mut controller, presenter_port) = create_controller();
        let newest = 32;

        thread::scope(|scope| {
            for lane in 0..4 {
                let controller = &controller;
                scope.spawn(move || {
                    for generation in (1..=newest).filter(|g| g % 4 == lane) {
                        controller.submit_request(create_test_request(generation, 64, 48));
                    }
                });
            }
        });

        let start = Instant::now();
        while controller.last_completed_generation() != newest
            && start.elapsed() < Duration::from_secs(5)
        {
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(controller.last_completed_generation(), newest);
        assert_eq!(
            presenter_port.take_events().last().map(RenderEvent::generation),
            Some(newest)
        );
        controller.shutdown();
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let result = InteractiveController::spawn(
            thread::Builder::new().stack_size(usize::MAX / 2),
            engine(),
            presenter_port,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (mut controller, _presenter_port) = create_controller();

        controller.shutdown();
        controller.shutdown();
    }
}
