use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::types::{PanDirection, RenderRequest, ViewAction};
use crate::core::data::bookmark::Bookmark;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{FractalFamily, FractalKind, FractalParameters};
use crate::core::data::iteration_policy::IterationPolicy;
use crate::core::data::plane_region::PlaneRegion;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::engine::RenderJob;
use crate::core::errors::InvalidParameterError;
use crate::core::themes::theme::Theme;
use crate::core::util::pixel_to_complex_coords::{PlaneMapping, pixel_to_complex_coords};

const STEP_FRACTION: f64 = 0.1;

/// Navigable bounds; regions outside them are rejected rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLimits {
    pub min_extent: f64,
    pub max_extent: f64,
    pub max_center_abs: f64,
}

impl ViewLimits {
    pub fn check(&self, region: &PlaneRegion) -> Result<(), InvalidParameterError> {
        let center = region.center();
        let extent_ok = |extent: f64| (self.min_extent..=self.max_extent).contains(&extent);

        if extent_ok(region.width())
            && extent_ok(region.height())
            && center.real.abs() <= self.max_center_abs
            && center.imag.abs() <= self.max_center_abs
        {
            Ok(())
        } else {
            Err(InvalidParameterError::RegionOutOfBounds {
                width: region.width(),
                height: region.height(),
                center_real: center.real,
                center_imag: center.imag,
            })
        }
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            min_extent: 1e-15,
            max_extent: 20.0,
            max_center_abs: 100.0,
        }
    }
}

/// Everything the user controls about the current view.
///
/// `params` carries the fixed iteration limit; the limit actually rendered
/// comes from `iteration_policy`. The Julia constant and Fatou exponent are
/// remembered while another family is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub size: ViewportSize,
    pub region: PlaneRegion,
    pub params: FractalParameters,
    pub theme: Theme,
    pub theme_seed: u64,
    pub iteration_policy: IterationPolicy,
    pub julia_constant: Complex,
    pub fatou_exponent: u32,
}

impl ViewState {
    fn family_for(&self, kind: FractalKind) -> FractalFamily {
        match kind {
            FractalKind::Mandelbrot => FractalFamily::Mandelbrot,
            FractalKind::Julia => FractalFamily::Julia {
                c: self.julia_constant,
            },
            FractalKind::Fatou => FractalFamily::Fatou {
                exponent: self.fatou_exponent,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportStatus {
    Idle,
    Computing { generation: u64 },
    Error { generation: u64, message: String },
}

/// Outcome of feeding a render event back into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Presented,
    Failed,
    Stale,
}

/// Validates user actions against the current view and issues numbered
/// render requests. Only the newest generation may change what is shown.
pub struct ViewportStateMachine {
    view: ViewState,
    home: ViewState,
    base_width: f64,
    limits: ViewLimits,
    generation: u64,
    status: ViewportStatus,
    frame: Option<Arc<FrameData>>,
    seed_source: StdRng,
}

impl ViewportStateMachine {
    /// Starts from `home`, fitting its region to the viewport aspect.
    pub fn new(home: ViewState) -> Result<Self, InvalidParameterError> {
        Self::with_limits(home, ViewLimits::default())
    }

    pub fn with_limits(home: ViewState, limits: ViewLimits) -> Result<Self, InvalidParameterError> {
        let mut view = home.clone();
        view.region = home.region.fit_aspect(home.size)?;
        limits.check(&view.region)?;

        Ok(Self {
            base_width: view.region.width(),
            seed_source: StdRng::seed_from_u64(home.theme_seed),
            view,
            home,
            limits,
            generation: 0,
            status: ViewportStatus::Idle,
            frame: None,
        })
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn status(&self) -> &ViewportStatus {
        &self.status
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Most recent frame accepted for the latest generation at the time.
    #[must_use]
    pub fn frame(&self) -> Option<Arc<FrameData>> {
        self.frame.clone()
    }

    /// Magnification relative to the home view.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.base_width / self.view.region.width()
    }

    /// Iteration limit the next render uses.
    #[must_use]
    pub fn effective_max_iterations(&self) -> u32 {
        Self::max_iterations_for(&self.view, self.base_width)
    }

    fn max_iterations_for(view: &ViewState, base_width: f64) -> u32 {
        view.iteration_policy
            .max_iterations(view.params.max_iterations(), base_width / view.region.width())
    }

    /// Applies `action` and returns the request that renders the result.
    ///
    /// On error nothing changes: view, status and generation stay as they were.
    pub fn apply(&mut self, action: ViewAction) -> Result<RenderRequest, InvalidParameterError> {
        let mut seed_source = self.seed_source.clone();
        let next = match self.next_view(&action, &mut seed_source) {
            Ok(next) => next,
            Err(err) => {
                warn!("rejected {:?}: {}", action, err);
                return Err(err);
            }
        };

        let base_width = match action {
            ViewAction::Reset => next.region.width(),
            _ => self.base_width,
        };
        let job = Self::job_for(&next, base_width)?;

        self.view = next;
        self.base_width = base_width;
        self.seed_source = seed_source;
        self.generation += 1;
        self.status = ViewportStatus::Computing {
            generation: self.generation,
        };
        debug!("generation {} issued for {:?}", self.generation, action);

        Ok(RenderRequest {
            generation: self.generation,
            job,
        })
    }

    /// Feeds a controller event back. Events for anything but the latest
    /// generation are discarded.
    pub fn complete(&mut self, event: RenderEvent) -> Completion {
        let latest = self.generation;
        let pending = matches!(self.status, ViewportStatus::Computing { generation } if generation == latest);

        if event.generation() != latest || !pending {
            debug!(
                "discarding stale event for generation {} (latest {})",
                event.generation(),
                latest
            );
            return Completion::Stale;
        }

        match event {
            RenderEvent::Frame(frame) => {
                info!(
                    "generation {} presented after {:?}",
                    frame.generation, frame.render_duration
                );
                self.frame = Some(Arc::new(frame));
                self.status = ViewportStatus::Idle;
                Completion::Presented
            }
            RenderEvent::Error(error) => {
                warn!("{}", error);
                self.status = ViewportStatus::Error {
                    generation: error.generation,
                    message: error.message,
                };
                Completion::Failed
            }
        }
    }

    /// Captures the current view under `name`.
    #[must_use]
    pub fn snapshot_bookmark(&self, name: &str, created_at: u64) -> Bookmark {
        Bookmark {
            name: name.to_string(),
            region: self.view.region,
            params: self.view.params,
            theme: self.view.theme,
            iteration_policy: self.view.iteration_policy,
            zoom_level: self.zoom_level(),
            created_at,
        }
    }

    fn job_for(view: &ViewState, base_width: f64) -> Result<RenderJob, InvalidParameterError> {
        Ok(RenderJob {
            size: view.size,
            region: view.region,
            params: view
                .params
                .with_max_iterations(Self::max_iterations_for(view, base_width))?,
            theme: view.theme,
            theme_seed: view.theme_seed,
        })
    }

    fn mapping(&self) -> PlaneMapping {
        PlaneMapping::new(self.view.region, self.view.size)
    }

    fn next_view(
        &self,
        action: &ViewAction,
        seed_source: &mut StdRng,
    ) -> Result<ViewState, InvalidParameterError> {
        let mut next = self.view.clone();

        match action {
            ViewAction::ZoomAt { anchor, factor } => {
                let anchor = match anchor {
                    Some(point) => pixel_to_complex_coords(*point, &self.mapping())?,
                    None => next.region.center(),
                };
                next.region = next.region.zoom_about(anchor, *factor)?;
            }
            ViewAction::Pan { dx, dy } => {
                next.region = next.region.translate(self.mapping().pixel_delta(*dx, *dy))?;
            }
            ViewAction::Step(direction) => {
                let dx = next.region.width() * STEP_FRACTION;
                let dy = next.region.height() * STEP_FRACTION;
                let delta = match direction {
                    PanDirection::Left => Complex::new(-dx, 0.0),
                    PanDirection::Right => Complex::new(dx, 0.0),
                    PanDirection::Up => Complex::new(0.0, -dy),
                    PanDirection::Down => Complex::new(0.0, dy),
                };
                next.region = next.region.translate(delta)?;
            }
            ViewAction::Resize(size) => {
                next.size = *size;
                next.region = next.region.refit_height(*size)?;
            }
            ViewAction::SelectTheme(name) => {
                let theme = Theme::from_name(name)?;
                Self::change_theme(&mut next, theme, seed_source);
            }
            ViewAction::CycleTheme => {
                let theme = next.theme.next();
                Self::change_theme(&mut next, theme, seed_source);
            }
            ViewAction::SelectFamily(name) => {
                let kind = FractalKind::from_name(name)?;
                next.params = next.params.with_family(next.family_for(kind))?;
            }
            ViewAction::SetJuliaConstant(c) => {
                if !c.is_finite() {
                    return Err(InvalidParameterError::NonFiniteJuliaConstant {
                        real: c.real,
                        imag: c.imag,
                    });
                }
                next.julia_constant = *c;
                if next.params.family().kind() == FractalKind::Julia {
                    next.params = next.params.with_family(FractalFamily::Julia { c: *c })?;
                }
            }
            ViewAction::SetMaxIterations(max_iterations) => {
                next.params = next.params.with_max_iterations(*max_iterations)?;
                next.iteration_policy = IterationPolicy::Fixed;
            }
            ViewAction::SetIterationPolicy(policy) => {
                next.iteration_policy = *policy;
            }
            ViewAction::LoadBookmark(bookmark) => {
                next.region = bookmark.region;
                next.params = bookmark.params;
                next.iteration_policy = bookmark.iteration_policy;
                match bookmark.params.family() {
                    FractalFamily::Julia { c } => next.julia_constant = c,
                    FractalFamily::Fatou { exponent } => next.fatou_exponent = exponent,
                    FractalFamily::Mandelbrot => {}
                }
                Self::change_theme(&mut next, bookmark.theme, seed_source);
            }
            ViewAction::Reset => {
                next.region = self.home.region.fit_aspect(next.size)?;
                next.params = self.home.params;
                next.iteration_policy = self.home.iteration_policy;
                next.julia_constant = self.home.julia_constant;
                next.fatou_exponent = self.home.fatou_exponent;
            }
            ViewAction::Redraw => {}
        }

        self.limits.check(&next.region)?;

        Ok(next)
    }

    /// Switching to a different theme draws a fresh seed; reselecting the
    /// current one keeps the colours stable.
    fn change_theme(next: &mut ViewState, theme: Theme, seed_source: &mut StdRng) {
        if theme != next.theme {
            next.theme = theme;
            next.theme_seed = seed_source.next_u64();
        }
    }
}
