//! Explicit state machine for animated galaxy/system view changes.

use glam::Vec3;

use super::pose::{SceneAnchors, ViewMode, ViewPose};
use crate::options::CameraOptions;

/// Receives camera and loading notifications while a transition runs.
pub trait TransitionObserver {
    /// The camera moved to `position` this tick.
    fn camera_moved(&mut self, _position: Vec3) {}

    /// A transition started (`true`) or finished (`false`).
    fn loading_changed(&mut self, _loading: bool) {}
}

/// Observer that ignores everything.
impl TransitionObserver for () {}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// Camera belongs to the user; the controller never writes it.
    Idle,
    /// Interpolating toward the current mode's target.
    Transitioning,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    start: ViewPose,
    elapsed: f32,
}

/// Drives the camera between view modes.
///
/// Requests while a transition is running preempt it: the current pose
/// becomes the new start and the target is recomputed, so the camera never
/// jumps. Targets are recomputed from the anchors each tick.
#[derive(Debug, Clone)]
pub struct ViewTransitionController {
    options: CameraOptions,
    mode: ViewMode,
    active: Option<ActiveTransition>,
}

impl ViewTransitionController {
    /// Idle controller already showing `mode`.
    #[must_use]
    pub fn new(mode: ViewMode, options: CameraOptions) -> Self {
        Self {
            options,
            mode,
            active: None,
        }
    }

    /// Mode currently shown or being flown to.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TransitionState {
        if self.active.is_some() {
            TransitionState::Transitioning
        } else {
            TransitionState::Idle
        }
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    /// Transition tuning.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Replace the tuning. A running transition continues with the new
    /// durations.
    pub fn set_options(&mut self, options: CameraOptions) {
        self.options = options;
    }

    /// Length of a full transition in seconds.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.options
            .position_duration
            .max(self.options.orientation_duration)
            .max(0.0)
    }

    /// Pose the controller is flying toward for `mode`, given the start pose.
    #[must_use]
    pub fn target_pose(
        &self,
        mode: ViewMode,
        start: &ViewPose,
        anchors: &dyn SceneAnchors,
    ) -> ViewPose {
        let anchor = anchors.anchor(mode);
        let (offset, [rx, ry]) = match mode {
            ViewMode::Galaxy => {
                (self.options.galaxy_offset, self.options.galaxy_rotation)
            }
            ViewMode::System => {
                (self.options.system_offset, self.options.system_rotation)
            }
        };
        ViewPose {
            position: anchor + Vec3::from_array(offset),
            rotation: Vec3::new(rx, ry, start.rotation.z),
            target: anchor,
        }
    }

    /// Ask for `mode`.
    ///
    /// Starts a transition from `current`, or restarts a running one from
    /// `current`. When idle and already showing `mode` this does nothing.
    /// Returns whether a transition was started.
    pub fn request_view(
        &mut self,
        mode: ViewMode,
        current: &ViewPose,
        observer: &mut dyn TransitionObserver,
    ) -> bool {
        let was_idle = self.active.is_none();
        if was_idle && mode == self.mode {
            return false;
        }

        if was_idle {
            log::debug!("view transition to {mode:?} started");
        } else {
            log::debug!("view transition preempted by {mode:?}");
        }
        self.mode = mode;
        self.active = Some(ActiveTransition {
            start: *current,
            elapsed: 0.0,
        });
        if was_idle {
            observer.loading_changed(true);
        }
        true
    }

    /// Advance by `dt` seconds and write the interpolated pose.
    ///
    /// Returns `false` (and leaves `pose` untouched) when idle.
    pub fn tick(
        &mut self,
        dt: f32,
        pose: &mut ViewPose,
        anchors: &dyn SceneAnchors,
        observer: &mut dyn TransitionObserver,
    ) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };
        active.elapsed += dt.max(0.0);

        let target = self.target_pose(self.mode, &active.start, anchors);
        let position_t = progress(active.elapsed, self.options.position_duration);
        let orientation_t =
            progress(active.elapsed, self.options.orientation_duration);

        let done = position_t >= 1.0 && orientation_t >= 1.0;
        *pose = if done {
            target
        } else {
            let easing = self.options.easing;
            active.start.lerp_split(
                &target,
                easing.evaluate(position_t),
                easing.evaluate(orientation_t),
            )
        };
        observer.camera_moved(pose.position);

        if done {
            self.active = None;
            log::debug!("view transition to {:?} finished", self.mode);
            observer.loading_changed(false);
        } else {
            self.active = Some(active);
        }
        true
    }
}

/// Linear progress through `duration`; zero-length channels are complete.
fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
