//! Read-only queries and small setters for [`ExoplanetEngine`].

use glam::Vec3;

use super::presenter::{Presenter, RenderMode};
use super::ExoplanetEngine;
use crate::camera::{ViewMode, ViewPose};
use crate::catalog::Catalog;
use crate::charts::{self, ScatterChart};
use crate::options::ToolSettings;
use crate::starfield::StarField;

// ── Tool settings ──

impl ExoplanetEngine {
    /// Current tool settings snapshot.
    #[must_use]
    pub fn tool_settings(&self) -> &ToolSettings {
        &self.options.tools
    }

    /// Replace the tool settings. Presentation-only toggles apply
    /// immediately; the pipeline re-runs on the next update if a relevant
    /// field changed.
    pub fn set_tool_settings(&mut self, settings: ToolSettings) {
        self.presenter
            .set_render_mode(RenderMode::from_instant_mesh(settings.is_instant_mesh));
        self.options.tools = settings;
    }
}

// ── Camera ──

impl ExoplanetEngine {
    /// Live camera pose.
    #[must_use]
    pub fn camera_pose(&self) -> &ViewPose {
        &self.pose
    }

    /// Move the camera directly (user orbit controls). Any running
    /// transition continues from the next tick onward.
    pub fn set_camera_pose(&mut self, pose: ViewPose) {
        self.pose = pose;
    }

    /// Mode currently shown or being flown to.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.transition.mode()
    }

    /// Whether the camera is mid-flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    /// Move the galaxy-center anchor.
    pub fn set_galaxy_center(&mut self, position: Vec3) {
        self.anchors.galaxy_center = position;
    }

    /// Move the focused body. A running flight toward the system view
    /// follows it.
    pub fn set_focus_body(&mut self, position: Vec3) {
        self.anchors.focus_body = position;
    }
}

// ── Planets ──

impl ExoplanetEngine {
    /// Loaded catalog (empty while loading or after a failed load).
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the startup catalog load is still running.
    #[must_use]
    pub fn is_catalog_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Visible planet set and render flags.
    #[must_use]
    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Loading flag for the UI: raised while a view transition runs.
    #[must_use]
    pub fn is_loading_planets(&self) -> bool {
        self.presenter.is_loading()
    }

    /// Whether the latest pipeline generation is still being computed.
    #[must_use]
    pub fn is_pipeline_running(&self) -> bool {
        self.pipeline.is_running()
    }

    /// Latest pipeline generation issued.
    #[must_use]
    pub fn pipeline_generation(&self) -> u64 {
        self.pipeline.generation()
    }

    /// Orbital period vs radius chart over the full catalog.
    #[must_use]
    pub fn orbital_period_chart(&self) -> ScatterChart {
        charts::orbital_period_vs_radius(self.catalog.planets())
    }

    /// Distance vs radius chart over the full catalog.
    #[must_use]
    pub fn distance_chart(&self) -> ScatterChart {
        charts::distance_vs_radius(self.catalog.planets())
    }

    /// Background stars.
    #[must_use]
    pub fn starfield(&self) -> &StarField {
        &self.starfield
    }
}
