use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::controllers::interactive::errors::explorer_error::ExplorerError;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::state_machine::{ViewState, ViewportStateMachine};
use crate::controllers::interactive::types::ViewAction;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::NeverCancel;
use crate::core::data::bookmark::Bookmark;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::engine::{EngineError, FractalEngine};

/// Renders a single frame and hands it to a file presenter.
pub struct SnapshotController<P: FilePresenterPort> {
    engine: Arc<FractalEngine>,
    presenter: P,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> SnapshotController<P> {
    pub fn new(engine: Arc<FractalEngine>, presenter: P) -> Self {
        Self {
            engine,
            presenter,
            buffer: None,
        }
    }

    pub fn generate(&mut self, home: ViewState) -> Result<(), ExplorerError> {
        self.generate_after(home, ViewAction::Redraw)
    }

    /// Renders `bookmark` at the home viewport size.
    pub fn generate_bookmark(
        &mut self,
        home: ViewState,
        bookmark: Bookmark,
    ) -> Result<(), ExplorerError> {
        self.generate_after(home, ViewAction::LoadBookmark(bookmark))
    }

    fn generate_after(&mut self, home: ViewState, action: ViewAction) -> Result<(), ExplorerError> {
        let mut state = ViewportStateMachine::new(home)?;
        let request = state.apply(action)?;
        let job = &request.job;

        info!(
            "rendering {} {}x{} at {} iterations on {} workers",
            job.params.family().kind(),
            job.size.width(),
            job.size.height(),
            job.params.max_iterations(),
            self.engine.worker_count()
        );

        let frame = self.engine.render(job, &NeverCancel).map_err(|err| {
            let section = match &err {
                EngineError::WorkerFailure { section, .. } => Some(*section),
                _ => None,
            };
            RenderError {
                generation: request.generation,
                section,
                message: err.to_string(),
            }
        })?;

        info!("duration: {:?}", frame.render_duration);
        self.buffer = Some(frame.pixel_buffer);

        Ok(())
    }

    /// Writes the last generated frame. Returns `false` if nothing was generated yet.
    pub fn write(&self, filepath: &Path) -> std::io::Result<bool> {
        match &self.buffer {
            Some(buffer) => {
                self.presenter.present(buffer, filepath)?;
                info!("saved to {}", filepath.display());
                Ok(true)
            }
            None => {
                warn!("no frame generated, nothing written to {}", filepath.display());
                Ok(false)
            }
        }
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use std::sync::Mutex;

    use crate::core::data::complex::Complex;
    use crate::core::data::fractal_params::{FractalFamily, FractalParameters};
    use crate::core::data::iteration_policy::IterationPolicy;
    use crate::core::data::plane_region::PlaneRegion;
    use crate::core::data::viewport_size::ViewportSize;
    use crate::core::themes::theme::Theme;

    #[derive(Default)]
    struct RecordingPresenter {
        written: Mutex<Vec<(usize, String)>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((buffer.buffer().len(), filepath.display().to_string()));
            Ok(())
        }
    }

    fn home() -> ViewState {
        ViewState {
            size: ViewportSize::new(40, 30).unwrap(),
            region: PlaneRegion::new(-2.0, 1.0, -1.5, 1.5).unwrap(),
            params: FractalParameters::new(FractalFamily::Fatou { exponent: 3 }, 30).unwrap(),
            theme: Theme::Rainbow,
            theme_seed: 1,
            iteration_policy: IterationPolicy::Fixed,
            julia_constant: Complex::new(-0.7, 0.27015),
            fatou_exponent: 3,
        }
    }

    fn engine() -> Arc<FractalEngine> {
        Arc::new(FractalEngine::new(NonZeroUsize::new(2).unwrap()).unwrap())
    }

    #[test_log::test]
    fn generate_then_write_presents_full_frame() {
        let presenter = RecordingPresenter::default();
        let mut controller = SnapshotController::new(engine(), &presenter);

        controller.generate(home()).unwrap();
        let written = controller.write(Path::new("out.ppm")).unwrap();

        assert!(written);
        assert_eq!(
            presenter.written.lock().unwrap().as_slice(),
            &[(40 * 30 * 3, "out.ppm".to_string())]
        );
    }

    #[test]
    fn generate_bookmark_renders_the_bookmarked_view() {
        let presenter = RecordingPresenter::default();
        let mut controller = SnapshotController::new(engine(), &presenter);
        let bookmark = Bookmark {
            name: "seahorse".to_string(),
            region: PlaneRegion::new(-0.8, -0.7, 0.05, 0.125).unwrap(),
            params: FractalParameters::new(FractalFamily::Mandelbrot, 40).unwrap(),
            theme: Theme::Fire,
            iteration_policy: IterationPolicy::Fixed,
            zoom_level: 30.0,
            created_at: 0,
        };

        controller.generate_bookmark(home(), bookmark).unwrap();

        assert_eq!(controller.buffer().map(|b| b.buffer().len()), Some(40 * 30 * 3));
    }

    #[test]
    fn out_of_bounds_bookmark_is_rejected() {
        let presenter = RecordingPresenter::default();
        let mut controller = SnapshotController::new(engine(), &presenter);
        let bookmark = Bookmark {
            name: "lost".to_string(),
            region: PlaneRegion::new(400.0, 401.0, 0.0, 0.75).unwrap(),
            params: FractalParameters::new(FractalFamily::Mandelbrot, 40).unwrap(),
            theme: Theme::Fire,
            iteration_policy: IterationPolicy::Fixed,
            zoom_level: 3.0,
            created_at: 0,
        };

        let result = controller.generate_bookmark(home(), bookmark);

        assert!(matches!(result, Err(ExplorerError::InvalidParameter(_))));
        assert!(controller.buffer().is_none());
    }

    #[test]
    fn write_before_generate_writes_nothing() {
        let presenter = RecordingPresenter::default();
        let controller = SnapshotController::new(engine(), &presenter);

        assert!(!controller.write(Path::new("out.ppm")).unwrap());
        assert!(presenter.written.lock().unwrap().is_empty());
    }
}
