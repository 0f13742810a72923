use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gw_core::RenderConfig;
use gw_render::terminal::terminal_size;
use gw_render::{CancelFlag, StdoutTerminal};

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.clamp_all();

    // 4. Construire et valider les tables
    let tables = pipeline::Tables::from_config(&config)?;
    if cli.list {
        print!("{}", tables.listing());
        return Ok(());
    }

    // 5. Annulation Ctrl-C
    let cancel = CancelFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || handler_flag.cancel())
        .context("Impossible d'installer le handler Ctrl-C")?;

    // 6. Source → renderer → terminal
    let mut term = StdoutTerminal::stdout();
    let report = if let Some(ref path) = cli.image {
        pipeline::run_image(path, &config, &tables, terminal_size(), cancel, &mut term)?
    } else {
        let renderer = pipeline::portrait_renderer(&config, &tables)?;
        pipeline::present(&renderer, &config, false, cancel, &mut term)?
    };

    if let Some(report) = report {
        log::info!(
            "{} frames écrites{}",
            report.frames,
            if report.cancelled { ", interrompu" } else { "" }
        );
    }
    Ok(())
}

/// Config file if present, defaults otherwise.
fn resolve_config(path: &Path) -> Result<RenderConfig> {
    if path.exists() {
        log::info!("Config : {}", path.display());
        gw_core::config::load_config(path)
    } else {
        log::warn!("Config introuvable : {}. Utilisation des défauts.", path.display());
        Ok(RenderConfig::default())
    }
}
