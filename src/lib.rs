// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests exercise panicking paths on purpose
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic, clippy::float_cmp))]

//! Exoplanet star-field core: an off-thread filter/score pipeline and
//! animated camera view transitions.
//!
//! exoviz takes a catalog of exoplanets, cuts it down with user thresholds,
//! scores every candidate for direct-imaging signal-to-noise and
//! habitable-zone membership, and hands the result to a render thread that
//! never blocks. A small state machine flies the camera between the galaxy
//! and planetary-system views.
//!
//! # Key entry points
//!
//! - [`engine::ExoplanetEngine`] - headless engine tying everything together
//! - [`pipeline::PipelineProcessor`] - background filter and scoring workers
//! - [`pipeline::run_pipeline`] - the same pipeline, inline
//! - [`camera::ViewTransitionController`] - galaxy/system camera flights
//! - [`scoring`] - pure habitability, SNR and color functions
//! - [`options::Options`] - tool settings and tuning, TOML presets
//!
//! # Architecture
//!
//! The filter and scoring stages run on two dedicated threads that talk
//! only through typed messages. Every run carries a generation number; a
//! newer run cancels older ones at the next chunk boundary, and the final
//! result is published through a lock-free triple buffer that the frame loop
//! polls. A failed run is reported but never replaces the planets already on
//! screen.

pub mod camera;
pub mod catalog;
pub mod charts;
pub mod engine;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod scoring;
pub mod starfield;
pub mod util;
