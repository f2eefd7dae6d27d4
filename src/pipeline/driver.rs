use std::sync::Arc;

use super::prepared::PipelineResult;
use super::processor::PipelineProcessor;
use crate::catalog::{Catalog, PlanetRecord};
use crate::error::ExovizError;
use crate::options::{PipelineInputs, PipelineOptions, ToolSettings};

/// Re-runs the pipeline whenever the catalog or a pipeline-relevant setting
/// changes.
///
/// Catalog changes are detected by storage identity, settings changes by
/// value. Toggles that only affect presentation (such as the render mode)
/// never trigger a run.
pub struct PlanetPipeline {
    processor: PipelineProcessor,
    last_catalog: Option<Arc<[PlanetRecord]>>,
    last_inputs: Option<PipelineInputs>,
    delivered: u64,
}

impl PlanetPipeline {
    /// Spawn the background workers.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::ThreadSpawn`] if a worker cannot be spawned.
    pub fn new(options: PipelineOptions) -> Result<Self, ExovizError> {
        Ok(Self {
            processor: PipelineProcessor::new(options)?,
            last_catalog: None,
            last_inputs: None,
            delivered: 0,
        })
    }

    /// Compare against the last submitted inputs and start a new generation
    /// if anything relevant changed. Returns the new generation, if any.
    pub fn sync(
        &mut self,
        catalog: &Catalog,
        settings: &ToolSettings,
    ) -> Option<u64> {
        let inputs = settings.pipeline_inputs();
        let catalog_changed = match &self.last_catalog {
            Some(last) => !Arc::ptr_eq(last, catalog.planets()),
            None => true,
        };
        let inputs_changed = self.last_inputs.as_ref() != Some(&inputs);
        if !catalog_changed && !inputs_changed {
            return None;
        }

        self.last_catalog = Some(Arc::clone(catalog.planets()));
        self.last_inputs = Some(inputs);
        Some(self.processor.run(catalog.planets(), settings))
    }

    /// Take the latest generation's result, if it has arrived.
    pub fn poll(&mut self) -> Option<PipelineResult> {
        let result = self.processor.try_recv()?;
        self.delivered = result.generation;
        Some(result)
    }

    /// Whether the latest generation is still being computed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.processor.generation() > self.delivered
    }

    /// Latest generation issued.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.processor.generation()
    }

    /// Mutable access to the underlying processor.
    pub fn processor_mut(&mut self) -> &mut PipelineProcessor {
        &mut self.processor
    }
}
