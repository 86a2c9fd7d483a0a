use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "facetglow",
    author,
    version,
    about = "Faceted glow solid: mesh attributes and per-frame shader uniforms",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the base mesh and report its facet attributes.
    Mesh(MeshArgs),
    /// Step the uniform driver headlessly and print one JSON object per frame.
    Simulate(SimulateArgs),
    /// List every tunable knob with its default and panel range.
    Knobs,
    /// Manage the settings file.
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct MeshArgs {
    /// Settings file to read mesh shape from (defaults to the user settings file).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the sphere radius.
    #[arg(long, value_name = "RADIUS")]
    pub radius: Option<f32>,

    /// Override the subdivision level (0 = plain icosahedron).
    #[arg(long, value_name = "LEVEL")]
    pub detail: Option<u32>,

    /// Also build an outline shell scaled by this factor.
    #[arg(long, value_name = "SCALE")]
    pub shell_scale: Option<f32>,

    /// Dump every attribute buffer as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Settings file (defaults to the user settings file when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of frames to step.
    #[arg(long, value_name = "COUNT", conflicts_with = "duration")]
    pub frames: Option<u64>,

    /// Simulated run time (e.g. `2s`, `1500ms`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Frame rate of the simulated render loop.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Normalized pointer position held for the whole run (e.g. `0.5,0.5`).
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer, default_value = "0,0")]
    pub pointer: (f32, f32),

    /// Surface size in physical pixels.
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size, default_value = "1280x720")]
    pub size: (u32, u32),

    /// Background image used for refraction; overrides the settings file.
    #[arg(long, value_name = "IMAGE")]
    pub background: Option<PathBuf>,

    /// Override a knob for this run (repeatable, e.g. `--set rotation_speed=0.5`).
    #[arg(long = "set", value_name = "KNOB=VALUE", value_parser = parse_knob_assignment)]
    pub overrides: Vec<(String, f32)>,

    /// Emit every Nth frame (the final frame is always emitted).
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub every: u64,

    /// Also drive the outline shell and include its uniforms.
    #[arg(long)]
    pub outline: bool,

    /// Pace frames against the wall clock instead of fixed steps.
    #[arg(long)]
    pub realtime: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved settings file location.
    Where,
    /// Write a settings file populated with defaults.
    Init(ConfigInitArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ConfigInitArgs {
    /// Overwrite an existing settings file.
    #[arg(long)]
    pub force: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let trimmed = value.trim();
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Duration::try_from_secs_f64(seconds)
            .map_err(|err| format!("invalid duration '{trimmed}': {err}"));
    }
    humantime::parse_duration(trimmed).map_err(|err| format!("invalid duration '{trimmed}': {err}"))
}

pub fn parse_pointer(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("pointer '{value}' must look like X,Y"))?;
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid pointer coordinate '{}'", raw.trim()))
    };
    Ok((parse(x)?, parse(y)?))
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .trim()
        .to_ascii_lowercase()
        .split_once('x')
        .map(|(w, h)| (w.trim().to_string(), h.trim().to_string()))
        .ok_or_else(|| format!("size '{value}' must look like WIDTHxHEIGHT"))?;
    let width: u32 = width
        .parse()
        .map_err(|_| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .parse()
        .map_err(|_| format!("invalid height '{height}'"))?;
    Ok((width, height))
}

pub fn parse_knob_assignment(value: &str) -> Result<(String, f32), String> {
    let (name, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("override '{value}' must look like KNOB=VALUE"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("knob name must not be empty".to_string());
    }
    let parsed: f32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}' for knob '{name}'", raw.trim()))?;
    Ok((name.to_string(), parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("800x600"), Ok((800, 600)));
        assert_eq!(parse_size(" 1920X1080 "), Ok((1920, 1080)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn parses_pointers() {
        assert_eq!(parse_pointer("0.5,0.25"), Ok((0.5, 0.25)));
        assert_eq!(parse_pointer(" 1 , 0 "), Ok((1.0, 0.0)));
        assert!(parse_pointer("0.5").is_err());
        assert!(parse_pointer("nan,0").is_err());
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("1500ms"), Ok(Duration::from_millis(1500)));
        assert!(parse_duration("-1").is_err());
        assert!(parse_duration("1e30").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn parses_knob_assignments() {
        assert_eq!(
            parse_knob_assignment("rotation_speed=0.5"),
            Ok(("rotation_speed".to_string(), 0.5))
        );
        assert!(parse_knob_assignment("rotation_speed").is_err());
        assert!(parse_knob_assignment("=1").is_err());
        assert!(parse_knob_assignment("edge_thickness=thick").is_err());
    }
}
