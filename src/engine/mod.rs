//! Headless engine: catalog, pipeline, presenter and camera in one place.

mod accessors;
mod options;
pub mod presenter;

use glam::Vec3;

use self::presenter::{Presenter, RenderMode};
use crate::camera::{FixedAnchors, ViewMode, ViewPose, ViewTransitionController};
use crate::catalog::{Catalog, CatalogLoader, CatalogSource};
use crate::error::ExovizError;
use crate::options::Options;
use crate::pipeline::PlanetPipeline;
use crate::starfield::StarField;

/// Galaxy-center anchor used until the host moves it.
const DEFAULT_GALAXY_CENTER: Vec3 = Vec3::ZERO;
/// Home-planet anchor used until the host moves it.
const DEFAULT_FOCUS_BODY: Vec3 = Vec3::new(10.0, 0.0, 0.0);

/// Headless core of the exoplanet viewer.
///
/// Owns the catalog, the background planet pipeline, the presenter holding
/// the visible set, the view transition controller and the star field.
///
/// # Frame loop
///
/// Call [`update`](Self::update) once per frame. It picks up the catalog
/// when the loader finishes, re-runs the pipeline when the catalog or tool
/// settings changed, applies any finished pipeline result and advances the
/// camera transition. Nothing in it blocks.
///
/// # Tool settings
///
/// Change thresholds and toggles with
/// [`set_tool_settings`](Self::set_tool_settings); the next `update` decides
/// whether a new pipeline generation is needed.
pub struct ExoplanetEngine {
    /// Filter/scoring/view/star-field options.
    options: Options,
    /// Currently applied options preset name, if any.
    active_preset: Option<String>,
    /// Planet catalog (empty until the loader delivers).
    catalog: Catalog,
    /// In-flight catalog load, if any.
    loader: Option<CatalogLoader>,
    /// Background filter + scoring workers.
    pipeline: PlanetPipeline,
    /// Visible planet set and render-side flags.
    presenter: Presenter,
    /// Galaxy/system camera flights.
    transition: ViewTransitionController,
    /// Live camera pose.
    pose: ViewPose,
    /// Positions the camera flies to.
    anchors: FixedAnchors,
    /// Background stars.
    starfield: StarField,
}

// =============================================================================
// Construction
// =============================================================================

impl ExoplanetEngine {
    /// Engine with an empty catalog, starting in galaxy view.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::ThreadSpawn`] if the pipeline workers cannot
    /// be spawned.
    pub fn new(options: Options) -> Result<Self, ExovizError> {
        let pipeline = PlanetPipeline::new(options.pipeline.clone())?;
        let presenter = Presenter::new(RenderMode::from_instant_mesh(
            options.tools.is_instant_mesh,
        ));
        let transition =
            ViewTransitionController::new(ViewMode::Galaxy, options.camera.clone());
        let anchors = FixedAnchors {
            galaxy_center: DEFAULT_GALAXY_CENTER,
            focus_body: DEFAULT_FOCUS_BODY,
        };
        let pose = transition.target_pose(
            ViewMode::Galaxy,
            &ViewPose::default(),
            &anchors,
        );
        let starfield = StarField::from_options(&options.starfield);
        log::debug!("star field: {} stars", starfield.len());

        Ok(Self {
            options,
            active_preset: None,
            catalog: Catalog::empty(),
            loader: None,
            pipeline,
            presenter,
            transition,
            pose,
            anchors,
            starfield,
        })
    }

    /// Engine that starts loading the catalog from `source` in the
    /// background.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::ThreadSpawn`] if a worker or the loader thread
    /// cannot be spawned.
    pub fn with_catalog_source(
        options: Options,
        source: CatalogSource,
    ) -> Result<Self, ExovizError> {
        let mut engine = Self::new(options)?;
        log::info!("loading planet catalog from {source:?}");
        engine.loader = Some(CatalogLoader::spawn(source)?);
        Ok(engine)
    }
}

// =============================================================================
// Frame loop
// =============================================================================

impl ExoplanetEngine {
    /// Advance one frame.
    ///
    /// Returns whether anything visible changed (planet set, render mode or
    /// camera).
    pub fn update(&mut self, dt: f32) -> bool {
        self.poll_catalog();

        if let Some(generation) =
            self.pipeline.sync(&self.catalog, &self.options.tools)
        {
            log::info!(
                "pipeline generation {generation} started for {} planets",
                self.catalog.len()
            );
        }
        if let Some(result) = self.pipeline.poll() {
            let _ = self.presenter.apply(result);
        }

        let camera_moved = self.transition.tick(
            dt,
            &mut self.pose,
            &self.anchors,
            &mut self.presenter,
        );
        self.presenter.take_dirty() || camera_moved
    }

    fn poll_catalog(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let Some(catalog) = loader.try_recv() {
            self.loader = None;
            self.catalog = catalog;
        }
    }

    /// Replace the catalog. The next [`update`](Self::update) re-runs the
    /// pipeline.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.loader = None;
        self.catalog = catalog;
    }

    /// Ask the camera to fly to `mode`. Returns whether a transition
    /// started.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        self.transition
            .request_view(mode, &self.pose, &mut self.presenter)
    }

    /// Fly to whichever view is not current.
    pub fn toggle_view(&mut self) -> bool {
        self.set_view_mode(self.transition.mode().toggled())
    }

    /// Stop the background workers.
    pub fn shutdown(&mut self) {
        self.pipeline.processor_mut().shutdown();
    }
}

#[cfg(test)]
mod tests {
    use web_time::{Duration, Instant};

    use super::*;
    use crate::catalog::PlanetRecord;
    use crate::options::ToolSettings;
    use crate::pipeline::PipelineOutcome;

    fn earth_twin(name: &str, distance: f64) -> PlanetRecord {
        PlanetRecord {
            orbital_period: Some(365.0),
            planet_radius: Some(1.0),
            semi_major_axis: Some(1.0),
            stellar_teff: Some(5778.0),
            stellar_radius: Some(1.0),
            system_distance: Some(distance),
            ra: Some(45.0),
            dec: Some(10.0),
            ..PlanetRecord::named(name)
        }
    }

    fn pump_until(
        engine: &mut ExoplanetEngine,
        mut done: impl FnMut(&ExoplanetEngine) -> bool,
    ) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(engine) {
            assert!(Instant::now() < deadline, "engine never settled");
            let _ = engine.update(0.0);
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn catalog_flows_to_presenter() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        engine.set_catalog(Catalog::new(vec![
            earth_twin("near", 10.0),
            earth_twin("far", 80.0),
        ]));
        pump_until(&mut engine, |e| e.presenter().generation() > 0);
        assert_eq!(engine.presenter().set().len(), 2);

        engine.set_tool_settings(ToolSettings {
            system_distance: Some(20.0),
            ..engine.tool_settings().clone()
        });
        pump_until(&mut engine, |e| e.presenter().generation() > 1);
        assert_eq!(engine.presenter().set().len(), 1);
        assert_eq!(engine.presenter().set().planets()[0].name, "near");
        assert!(!engine.is_pipeline_running());
    }

    #[test]
    fn empty_thresholds_show_nothing() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        engine.set_catalog(Catalog::new(vec![earth_twin("far", 80.0)]));
        engine.set_tool_settings(ToolSettings {
            system_distance: Some(1.0),
            ..ToolSettings::default()
        });
        pump_until(&mut engine, |e| e.presenter().last_outcome().is_some());
        assert_eq!(
            engine.presenter().last_outcome(),
            Some(PipelineOutcome::NoCandidates)
        );
        assert!(engine.presenter().set().is_empty());
    }

    #[test]
    fn nan_settings_still_deliver() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        engine.set_catalog(Catalog::new(vec![earth_twin("near", 10.0)]));
        engine.set_tool_settings(ToolSettings {
            snr0: f64::NAN,
            orbital_distance: Some(f64::NAN),
            ..ToolSettings::default()
        });
        pump_until(&mut engine, |e| e.presenter().generation() > 0);
        assert_eq!(engine.pipeline_generation(), 1);
        assert_eq!(engine.presenter().set().len(), 1);
    }

    #[test]
    fn sets_wait_for_the_camera_to_land() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        assert!(engine.set_view_mode(ViewMode::System));
        engine.set_catalog(Catalog::new(vec![earth_twin("near", 10.0)]));
        pump_until(&mut engine, |e| e.presenter().has_pending());
        assert_eq!(engine.presenter().generation(), 0);

        for _ in 0..10 {
            let _ = engine.update(1.0);
        }
        assert!(!engine.is_transitioning());
        assert_eq!(engine.presenter().generation(), 1);
        assert_eq!(engine.presenter().set().len(), 1);
    }

    #[test]
    fn render_mode_toggle_does_not_rerun() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        engine.set_catalog(Catalog::new(vec![earth_twin("near", 10.0)]));
        pump_until(&mut engine, |e| e.presenter().generation() > 0);
        let generation = engine.pipeline_generation();

        engine.set_tool_settings(ToolSettings {
            is_instant_mesh: false,
            ..engine.tool_settings().clone()
        });
        assert!(engine.update(0.0));
        assert_eq!(engine.pipeline_generation(), generation);
        assert_eq!(engine.presenter().render_mode(), RenderMode::PerBody);
    }

    #[test]
    fn view_toggle_drives_loading_flag() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        assert!(!engine.is_loading_planets());
        assert!(engine.set_view_mode(ViewMode::System));
        assert!(engine.is_loading_planets());

        // Second request mid-flight preempts without a loading blip.
        let _ = engine.update(1.0);
        assert!(engine.toggle_view());
        assert_eq!(engine.view_mode(), ViewMode::Galaxy);
        assert!(engine.is_loading_planets());

        for _ in 0..10 {
            let _ = engine.update(1.0);
        }
        assert!(!engine.is_loading_planets());
        assert!(!engine.is_transitioning());
        assert_eq!(engine.camera_pose().target, DEFAULT_GALAXY_CENTER);
    }

    #[test]
    fn loader_failure_yields_empty_catalog() {
        let source = CatalogSource::File("/nonexistent/exoviz/planets.json".into());
        let mut engine =
            ExoplanetEngine::with_catalog_source(Options::default(), source).unwrap();
        assert!(engine.is_catalog_loading());
        pump_until(&mut engine, |e| !e.is_catalog_loading());
        assert!(engine.catalog().is_empty());
    }
}
