//! Options methods for ExoplanetEngine

use super::presenter::RenderMode;
use super::ExoplanetEngine;
use crate::options::Options;
use crate::pipeline::PlanetPipeline;
use crate::starfield::StarField;

impl ExoplanetEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the last loaded or saved preset.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        let pipeline_changed = new.pipeline != self.options.pipeline;
        let starfield_changed = new.starfield != self.options.starfield;
        self.options = new;
        self.apply_options(pipeline_changed, starfield_changed);
    }

    fn apply_options(&mut self, pipeline_changed: bool, starfield_changed: bool) {
        self.transition.set_options(self.options.camera.clone());
        self.presenter.set_render_mode(RenderMode::from_instant_mesh(
            self.options.tools.is_instant_mesh,
        ));

        if pipeline_changed {
            // New workers; the next update submits a fresh generation.
            match PlanetPipeline::new(self.options.pipeline.clone()) {
                Ok(pipeline) => self.pipeline = pipeline,
                Err(e) => log::error!("Failed to restart planet pipeline: {e}"),
            }
        }
        if starfield_changed {
            self.starfield = StarField::from_options(&self.options.starfield);
        }
    }

    /// Load a named preset from the presets directory.
    /// Returns true on success.
    pub fn load_preset(
        &mut self,
        name: &str,
        presets_dir: &std::path::Path,
    ) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(
        &mut self,
        name: &str,
        presets_dir: &std::path::Path,
    ) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save preset '{name}': {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StarFieldOptions;

    #[test]
    fn set_options_rebuilds_changed_parts() {
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        let mut opts = Options::default();
        opts.starfield = StarFieldOptions {
            num_stars: 12,
            ..StarFieldOptions::default()
        };
        opts.camera.position_duration = 1.0;
        opts.tools.is_instant_mesh = false;
        engine.set_options(opts);

        assert_eq!(engine.starfield().len(), 12);
        assert_eq!(engine.options().camera.position_duration, 1.0);
        assert_eq!(engine.presenter().render_mode(), RenderMode::PerBody);
    }

    #[test]
    fn preset_round_trip() {
        let dir = std::env::temp_dir()
            .join(format!("exoviz-engine-presets-{}", std::process::id()));
        let mut engine = ExoplanetEngine::new(Options::default()).unwrap();
        let mut opts = Options::default();
        opts.tools.snr0 = 250.0;
        engine.set_options(opts);
        assert!(engine.save_preset("deep", &dir));

        let mut other = ExoplanetEngine::new(Options::default()).unwrap();
        assert!(other.load_preset("deep", &dir));
        assert_eq!(other.tool_settings().snr0, 250.0);
        assert_eq!(other.active_preset(), Some("deep"));
        assert!(!other.load_preset("missing", &dir));
        let _ = std::fs::remove_dir_all(dir);
    }
}
