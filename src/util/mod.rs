//! Shared utilities: easing curves and frame timing.

/// Easing curves for view transitions.
pub mod easing;
/// Per-frame delta time, FPS and frame limiting.
pub mod frame_timing;
