//! Headless exoviz runner.
//!
//! Loads a planet catalog, runs the pipeline and flies the camera back and
//! forth between the galaxy and system views, logging what it sees.
//!
//! ```text
//! exoviz [CATALOG] [--options FILE.toml] [--seconds N] [--schema OUT.json]
//! ```
//!
//! `CATALOG` is a JSON file path or an `http(s)://` URL (needs the `fetch`
//! feature). Set `RUST_LOG=info` (or `debug`) to see progress.

use std::path::{Path, PathBuf};

use exoviz::catalog::CatalogSource;
use exoviz::engine::ExoplanetEngine;
use exoviz::options::Options;
use exoviz::util::frame_timing::FrameTiming;

/// Target FPS for the headless frame loop
const TARGET_FPS: u32 = 60;
/// Catalog used when none is given
const DEFAULT_CATALOG: &str = "assets/planets.json";
/// Seconds between automatic view toggles
const TOGGLE_INTERVAL: f32 = 8.0;

struct Args {
    catalog: String,
    options: Option<PathBuf>,
    seconds: f32,
    schema: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        catalog: DEFAULT_CATALOG.to_owned(),
        options: None,
        seconds: 20.0,
        schema: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--options" => {
                let path = iter.next().ok_or("--options needs a path")?;
                args.options = Some(PathBuf::from(path));
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                args.seconds = value
                    .parse()
                    .map_err(|e| format!("bad --seconds '{value}': {e}"))?;
            }
            "--schema" => {
                let path = iter.next().ok_or("--schema needs a path")?;
                args.schema = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown flag '{other}'"));
            }
            other => other.clone_into(&mut args.catalog),
        }
    }
    Ok(args)
}

fn write_schema(path: &Path) -> Result<(), String> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| e.to_string())?;
    std::fs::write(path, schema).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    if let Some(path) = &args.schema {
        match write_schema(path) {
            Ok(()) => log::info!("wrote options schema to {}", path.display()),
            Err(e) => log::error!("failed to write options schema: {e}"),
        }
    }

    let options = match &args.options {
        Some(path) => Options::load(path).unwrap_or_else(|e| {
            log::error!("failed to load options {}: {e}", path.display());
            Options::default()
        }),
        None => Options::default(),
    };

    let source = CatalogSource::parse(&args.catalog);
    let mut engine = match ExoplanetEngine::with_catalog_source(options, source)
    {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("failed to start engine: {e}");
            std::process::exit(1);
        }
    };

    let mut timing = FrameTiming::new(TARGET_FPS);
    let mut dt = 0.0_f32;
    let mut elapsed = 0.0_f32;
    let mut since_toggle = 0.0_f32;
    let mut shown_generation = 0;

    while elapsed < args.seconds {
        if !timing.should_render() {
            std::thread::sleep(timing.time_until_next_frame());
            continue;
        }

        let _ = engine.update(dt);

        let presenter = engine.presenter();
        if presenter.generation() != shown_generation {
            shown_generation = presenter.generation();
            let set = presenter.set();
            log::info!(
                "visible: {} planets, {} habitable, {} instance bytes ({:?})",
                set.len(),
                set.habitable_count(),
                presenter.instances().len(),
                presenter.render_mode()
            );
        }

        if since_toggle >= TOGGLE_INTERVAL && !engine.is_transitioning() {
            since_toggle = 0.0;
            if engine.toggle_view() {
                log::info!("flying to {:?} view", engine.view_mode());
            }
        }

        dt = timing.end_frame();
        elapsed += dt;
        since_toggle += dt;
    }

    let period_chart = engine.orbital_period_chart();
    let distance_chart = engine.distance_chart();
    log::info!(
        "done: {} catalog records, {} chart points, {} stars, {:.0} fps",
        engine.catalog().len(),
        period_chart.point_count() + distance_chart.point_count(),
        engine.starfield().len(),
        timing.fps()
    );
    engine.shutdown();
}
