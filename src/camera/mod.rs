//! Camera poses and animated view transitions.
//!
//! The camera belongs to the user except while a
//! [`ViewTransitionController`] is flying it between the galaxy and system
//! views.

/// Camera pose, view modes and scene anchors.
pub mod pose;
/// View transition state machine.
pub mod transition;

pub use pose::{FixedAnchors, SceneAnchors, ViewMode, ViewPose};
pub use transition::{
    TransitionObserver, TransitionState, ViewTransitionController,
};
