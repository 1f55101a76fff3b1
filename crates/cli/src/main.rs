#![deny(unsafe_code)]
//! CLI binary for the flowfield visualizer.
//!
//! Subcommands:
//! - `render`: run the simulation for N ticks on the CPU surface, write a PNG
//! - `list`: print the selectable field functions, colour modes and primitives
//! - `schema`: print the parameter schema as JSON
//!
//! Logging goes to stderr and is filtered through `RUST_LOG` (default `warn`).

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{
    ColorFunction, ColorScheme, Engine, FieldFunction, Primitive, RenderSurface, Seed, Simulation,
    SimulationConfig,
};
use flowfield_raster::RasterSurface;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowfield", about = "Noise flow-field particle visualizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N ticks and write a PNG snapshot.
    Render {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: u32,

        /// Number of ticks.
        #[arg(short, long, default_value_t = 240)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Parameter overrides as a JSON object, e.g. '{"field": {"function": "curl"}}'.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Replay a saved seed file; overrides every other run option.
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,

        /// Also write the run's seed file here.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// List selectable field functions, colour modes, schemes and primitives.
    List,
    /// Print the parameter schema.
    Schema,
}

/// Resolves run options into the seed that fully describes the run.
fn resolve_seed(
    width: u32,
    height: u32,
    steps: usize,
    seed: u64,
    params: &str,
    replay: Option<&Path>,
) -> Result<Seed, CliError> {
    if let Some(path) = replay {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
        let seed: Seed = serde_json::from_str(&text)
            .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))?;
        seed.validate()
            .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))?;
        return Ok(seed);
    }

    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let config = SimulationConfig::default()
        .apply_json(&params)
        .map_err(|e| CliError::Input(e.to_string()))?;
    let mut resolved = Seed::new(width, height, seed);
    resolved.steps = steps;
    resolved.config = config;
    resolved
        .validate()
        .map_err(|e| CliError::Input(e.to_string()))?;
    Ok(resolved)
}

/// Runs `seed.steps` ticks, presenting each frame.
fn render(seed: &Seed) -> Result<RasterSurface, CliError> {
    let mut sim = Simulation::from_seed(seed)?;
    let mut surface = RasterSurface::new(sim.viewport())?;
    for _ in 0..seed.steps {
        sim.step()?;
        surface.present(&sim.frame())?;
    }
    Ok(surface)
}

fn names<T: Copy>(all: &[T], name: fn(T) -> &'static str) -> Vec<&'static str> {
    all.iter().copied().map(name).collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let groups = [
                ("field functions", names(&FieldFunction::ALL, FieldFunction::as_str)),
                ("colour functions", names(&ColorFunction::ALL, ColorFunction::as_str)),
                ("colour schemes", names(&ColorScheme::ALL, ColorScheme::as_str)),
                ("primitives", names(&Primitive::ALL, Primitive::as_str)),
            ];
            if cli.json {
                let info = serde_json::json!({
                    "field_functions": groups[0].1,
                    "color_functions": groups[1].1,
                    "color_schemes": groups[2].1,
                    "primitives": groups[3].1,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (title, values) in &groups {
                    println!("{title}: {}", values.join(", "));
                }
            }
        }
        Command::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&SimulationConfig::schema())?
            );
        }
        Command::Render {
            width,
            height,
            steps,
            seed,
            params,
            replay,
            output,
            save_seed,
        } => {
            let seed = resolve_seed(width, height, steps, seed, &params, replay.as_deref())?;
            let surface = render(&seed)?;
            surface.write_png(&output)?;
            if let Some(path) = &save_seed {
                std::fs::write(path, serde_json::to_string_pretty(&seed)?)?;
            }
            info!(
                steps = seed.steps,
                seed = seed.seed,
                output = %output.display(),
                "render complete"
            );

            if cli.json {
                let info = serde_json::json!({
                    "width": seed.width,
                    "height": seed.height,
                    "steps": seed.steps,
                    "seed": seed.seed,
                    "particles": seed.config.motion.particle_count,
                    "output": output.display().to_string(),
                    "seed_file": save_seed.map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({} ticks, seed {}) -> {}",
                    seed.width,
                    seed.height,
                    seed.steps,
                    seed.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_render_defaults() {
        let cli = Cli::try_parse_from(["flowfield", "render"]).unwrap();
        match cli.command {
            Command::Render {
                width,
                height,
                steps,
                seed,
                replay,
                ..
            } => {
                assert_eq!((width, height, steps, seed), (512, 512, 240, 42));
                assert!(replay.is_none());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn cli_accepts_global_json_after_subcommand() {
        let cli = Cli::try_parse_from(["flowfield", "list", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn resolve_seed_applies_params() {
        let seed = resolve_seed(
            64,
            32,
            10,
            7,
            r#"{"field": {"function": "curl"}, "motion": {"particle_count": 50}}"#,
            None,
        )
        .unwrap();
        assert_eq!((seed.width, seed.height, seed.steps, seed.seed), (64, 32, 10, 7));
        assert_eq!(seed.config.field.function, FieldFunction::Curl);
        assert_eq!(seed.config.motion.particle_count, 50);
    }

    #[test]
    fn resolve_seed_rejects_bad_input_with_input_code() {
        let bad_json = resolve_seed(8, 8, 1, 1, "{nope", None).unwrap_err();
        assert_eq!(bad_json.exit_code(), 12);
        let bad_choice =
            resolve_seed(8, 8, 1, 1, r#"{"color": {"scheme": "viridis"}}"#, None).unwrap_err();
        assert_eq!(bad_choice.exit_code(), 12);
        let zero = resolve_seed(0, 8, 1, 1, "{}", None).unwrap_err();
        assert_eq!(zero.exit_code(), 12);
    }

    #[test]
    fn saved_seed_replays_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let original = resolve_seed(
            40,
            30,
            15,
            99,
            r#"{"motion": {"particle_count": 300}}"#,
            None,
        )
        .unwrap();
        std::fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

        let replayed = resolve_seed(1, 1, 0, 0, "{}", Some(path.as_path())).unwrap();
        assert_eq!(replayed, original);
        assert_eq!(
            render(&original).unwrap().to_rgba8(),
            render(&replayed).unwrap().to_rgba8()
        );
    }

    #[test]
    fn missing_replay_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_seed(8, 8, 1, 1, "{}", Some(dir.path().join("absent.json").as_path())).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let seed = resolve_seed(24, 16, 3, 5, r#"{"motion": {"particle_count": 100}}"#, None)
            .unwrap();
        render(&seed).unwrap().write_png(&output).unwrap();
        assert!(output.exists());
    }
}
