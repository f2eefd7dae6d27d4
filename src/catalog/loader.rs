//! One-shot background catalog loading.
//!
//! The catalog is read (or fetched) on its own thread at startup so the
//! frame loop keeps running. Any failure is logged and turned into an empty
//! catalog; ingestion problems are never fatal.

use std::sync::mpsc;

use super::{Catalog, CatalogSource};
use crate::error::ExovizError;

/// Handle to an in-flight catalog load.
pub struct CatalogLoader {
    result_rx: Option<mpsc::Receiver<Result<Catalog, ExovizError>>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl CatalogLoader {
    /// Start loading `source` on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::ThreadSpawn`] if the thread cannot be spawned.
    pub fn spawn(source: CatalogSource) -> Result<Self, ExovizError> {
        let (result_tx, result_rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("catalog-loader".into())
            .spawn(move || {
                let result = Catalog::from_source(&source);
                let _ = result_tx.send(result);
            })
            .map_err(ExovizError::ThreadSpawn)?;

        Ok(Self {
            result_rx: Some(result_rx),
            thread: Some(thread),
        })
    }

    /// Whether the load has been delivered already.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result_rx.is_none()
    }

    /// Non-blocking poll. Yields the catalog exactly once; a failed load
    /// yields an empty catalog.
    pub fn try_recv(&mut self) -> Option<Catalog> {
        let rx = self.result_rx.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(ExovizError::CatalogFetch(
                    "catalog loader exited without a result".to_owned(),
                ))
            }
        };
        self.result_rx = None;
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        Some(Self::or_empty(outcome))
    }

    /// Block until the load finishes.
    pub fn wait(mut self) -> Catalog {
        let outcome = match self.result_rx.take() {
            Some(rx) => rx.recv().unwrap_or_else(|_| {
                Err(ExovizError::CatalogFetch(
                    "catalog loader exited without a result".to_owned(),
                ))
            }),
            None => return Catalog::empty(),
        };
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        Self::or_empty(outcome)
    }

    fn or_empty(outcome: Result<Catalog, ExovizError>) -> Catalog {
        match outcome {
            Ok(catalog) => {
                log::info!("Planet catalog loaded: {} records", catalog.len());
                catalog
            }
            Err(e) => {
                log::error!("Error fetching planet data: {e}");
                Catalog::empty()
            }
        }
    }
}
