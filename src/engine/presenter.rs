//! Render-side holder of the planet set currently on screen.

use glam::Vec3;

use crate::camera::TransitionObserver;
use crate::pipeline::{PipelineOutcome, PipelineResult, ScoredPlanetSet};

/// How planets are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One instanced draw for every planet.
    #[default]
    Instanced,
    /// One mesh per planet.
    PerBody,
}

impl RenderMode {
    /// Mode selected by the instant-mesh toggle.
    #[must_use]
    pub fn from_instant_mesh(is_instant_mesh: bool) -> Self {
        if is_instant_mesh {
            Self::Instanced
        } else {
            Self::PerBody
        }
    }
}

/// Holds the last-known-good scored set and its instance bytes.
///
/// A failed generation never replaces what is on screen. Empty results
/// (no candidates) do, since an empty sky is the correct answer for
/// thresholds nothing passes.
///
/// While a view transition is loading, delivered sets are held back and the
/// newest one is swapped in when the camera lands.
#[derive(Debug, Default)]
pub struct Presenter {
    set: ScoredPlanetSet,
    instances: Vec<u8>,
    instance_count: u32,
    generation: u64,
    last_outcome: Option<PipelineOutcome>,
    render_mode: RenderMode,
    loading: bool,
    pending: Option<PipelineResult>,
    view_position: Vec3,
    dirty: bool,
}

impl Presenter {
    /// Empty presenter drawing in `render_mode`.
    #[must_use]
    pub fn new(render_mode: RenderMode) -> Self {
        Self {
            render_mode,
            ..Self::default()
        }
    }

    /// Take a delivered pipeline result. Returns whether the visible set
    /// changed; a set held back during loading reports `false`.
    pub fn apply(&mut self, result: PipelineResult) -> bool {
        self.last_outcome = Some(result.outcome);
        if result.outcome != PipelineOutcome::Failed && self.loading {
            log::debug!(
                "holding generation {} until the view transition ends",
                result.generation
            );
            self.pending = Some(result);
            return false;
        }
        self.show(result)
    }

    fn show(&mut self, result: PipelineResult) -> bool {
        if result.outcome == PipelineOutcome::Failed {
            log::warn!(
                "generation {} failed; keeping {} planets from generation {}",
                result.generation,
                self.set.len(),
                self.generation
            );
            return false;
        }

        log::info!(
            "showing {} planets ({} habitable) from generation {}",
            result.set.len(),
            result.set.habitable_count(),
            result.generation
        );
        self.set = result.set;
        self.instances = result.instances;
        self.instance_count = result.instance_count;
        self.generation = result.generation;
        self.dirty = true;
        true
    }

    /// Planets currently on screen.
    #[must_use]
    pub fn set(&self) -> &ScoredPlanetSet {
        &self.set
    }

    /// Instance bytes for the instanced draw.
    #[must_use]
    pub fn instances(&self) -> &[u8] {
        &self.instances
    }

    /// Number of instances in [`instances`](Self::instances).
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Generation the visible set came from (0 before the first result).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the last delivered generation, failed or not.
    #[must_use]
    pub fn last_outcome(&self) -> Option<PipelineOutcome> {
        self.last_outcome
    }

    /// Current draw mode.
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Switch draw mode. The set is reused as is.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode != self.render_mode {
            log::debug!("render mode {:?} -> {mode:?}", self.render_mode);
            self.render_mode = mode;
            self.dirty = true;
        }
    }

    /// Whether a view transition is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a delivered set is waiting for the transition to end.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Last camera position reported during a transition.
    #[must_use]
    pub fn view_position(&self) -> Vec3 {
        self.view_position
    }

    /// Return and clear the "needs redraw" flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl TransitionObserver for Presenter {
    fn camera_moved(&mut self, position: Vec3) {
        self.view_position = position;
    }

    fn loading_changed(&mut self, loading: bool) {
        self.loading = loading;
        if !loading {
            if let Some(result) = self.pending.take() {
                let _ = self.show(result);
            }
        }
    }
}
