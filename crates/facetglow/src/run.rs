use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tuning::{Folder, KNOB_SPECS};
use uniforms::Parameters;

use crate::cli::ConfigAction;
use crate::paths::{AppPaths, ENV_CONFIG_DIR};
use crate::settings::init_settings;

/// Logs go to stderr so stdout stays machine-readable.
pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

pub fn run_knobs() -> Result<()> {
    let defaults = Parameters::default();
    let mut folder = None;
    for spec in &KNOB_SPECS {
        if folder != Some(spec.folder) {
            println!("{}:", spec.folder.name());
            folder = Some(spec.folder);
        }
        let step = spec
            .step
            .map(|step| format!(" step {step}"))
            .unwrap_or_default();
        let uniform = match (spec.folder, spec.knob.uniform()) {
            (_, Some(uniform)) => uniform,
            (Folder::Bloom, None) => "(bloom pass)",
            (Folder::Main, None) => "(rotation)",
        };
        println!(
            "  {:<22} default {:<10} range {}..={}{step}  -> {uniform}",
            spec.knob.name(),
            defaults.get(spec.knob),
            spec.min,
            spec.max,
        );
    }
    Ok(())
}

pub fn run_config(action: ConfigAction, paths: &AppPaths) -> Result<()> {
    match action {
        ConfigAction::Where => {
            let file = paths.settings_file();
            println!("Config directory: {}", paths.config_dir().display());
            println!(
                "Settings file:    {} ({})",
                file.display(),
                if file.exists() { "present" } else { "missing" }
            );
            println!("Override with ${ENV_CONFIG_DIR}.");
            Ok(())
        }
        ConfigAction::Init(args) => {
            let path = init_settings(paths, args.force)?;
            println!("Wrote default settings to {}", path.display());
            Ok(())
        }
    }
}
