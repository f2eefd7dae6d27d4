use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which part of the scene the camera frames.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Wide shot of the whole galaxy.
    #[default]
    Galaxy,
    /// Close-up of the focused planetary system.
    System,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Galaxy => Self::System,
            Self::System => Self::Galaxy,
        }
    }
}

/// Camera pose: position, Euler rotation (XYZ, radians) and look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}

impl ViewPose {
    /// Pose from its three parts.
    #[must_use]
    pub fn new(position: Vec3, rotation: Vec3, target: Vec3) -> Self {
        Self {
            position,
            rotation,
            target,
        }
    }

    /// Interpolate position by `tp` and rotation and target by `to`.
    #[must_use]
    pub fn lerp_split(&self, other: &Self, tp: f32, to: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, tp),
            rotation: self.rotation.lerp(other.rotation, to),
            target: self.target.lerp(other.target, to),
        }
    }

    /// Largest component difference to `other`, for approximate comparisons.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        (self.position - other.position)
            .abs()
            .max_element()
            .max((self.rotation - other.rotation).abs().max_element())
            .max((self.target - other.target).abs().max_element())
    }
}

/// Read-only scene positions the camera flies to. Read on every tick, so a
/// moving anchor is tracked for the whole transition.
pub trait SceneAnchors {
    /// Center of the galaxy view.
    fn galaxy_center(&self) -> Vec3;

    /// Currently focused body for the system view.
    fn focus_body(&self) -> Vec3;

    /// Anchor for `mode`.
    fn anchor(&self, mode: ViewMode) -> Vec3 {
        match mode {
            ViewMode::Galaxy => self.galaxy_center(),
            ViewMode::System => self.focus_body(),
        }
    }
}

/// Fixed anchor positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedAnchors {
    /// Galaxy center.
    pub galaxy_center: Vec3,
    /// Focused body.
    pub focus_body: Vec3,
}

impl SceneAnchors for FixedAnchors {
    fn galaxy_center(&self) -> Vec3 {
        self.galaxy_center
    }

    fn focus_body(&self) -> Vec3 {
        self.focus_body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lerp_moves_channels_independently() {
        let a = ViewPose::default();
        let b = ViewPose::new(Vec3::splat(10.0), Vec3::splat(1.0), Vec3::X);
        let mid = a.lerp_split(&b, 0.5, 1.0);
        assert_eq!(mid.position, Vec3::splat(5.0));
        assert_eq!(mid.rotation, Vec3::splat(1.0));
        assert_eq!(mid.target, Vec3::X);
        assert!((a.max_abs_diff(&b) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn anchor_follows_mode() {
        let anchors = FixedAnchors {
            galaxy_center: Vec3::ZERO,
            focus_body: Vec3::new(1.0, 2.0, 3.0),
        };
        assert_eq!(anchors.anchor(ViewMode::Galaxy), Vec3::ZERO);
        assert_eq!(anchors.anchor(ViewMode::System), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ViewMode::Galaxy.toggled(), ViewMode::System);
    }
}
