// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, info, warn};

use wlinfo_core::{Diagnostics, Engine, Options, Transport};

use crate::cli::{Args, Cmd, OutputsArgs};
use crate::config::{self, Format, WlinfoConfig};
use crate::paths;
use crate::print;
use crate::wayland::WaylandTransport;

pub fn run(args: Args) -> Result<(), String> {
    let config_path = args.config.clone().unwrap_or_else(paths::default_config_path);
    debug!("config: {}", config_path.display());

    let cfg = config::load(&config_path)?;
    debug!("config values: {:?}", cfg);

    match args.resolved_cmd() {
        Cmd::Outputs(o) => run_outputs(&cfg, &o),
        Cmd::Globals { json } => run_globals(json),
    }
}

/// CLI flags win over the config file.
fn options_for(cfg: &WlinfoConfig, o: &OutputsArgs) -> Options {
    Options {
        max_outputs: o.max_outputs.map(|n| n as usize).or(cfg.max_outputs),
        extended: cfg.extended && !o.no_extended,
    }
}

fn run_outputs(cfg: &WlinfoConfig, o: &OutputsArgs) -> Result<(), String> {
    let options = options_for(cfg, o);
    let format = if o.json { Format::Json } else { cfg.format };

    let transport = WaylandTransport::connect()?;
    info!("connected to compositor");

    let mut engine = Engine::new(transport, options).map_err(|e| format!("{e}"))?;

    engine.discover().map_err(|e| format!("discovery: {e}"))?;
    info!(
        "discovered {} outputs (extended metadata: {})",
        engine.output_count(),
        if engine.has_manager() { "yes" } else { "no" }
    );

    engine.populate().map_err(|e| format!("output population: {e}"))?;
    engine
        .populate_extended()
        .map_err(|e| format!("extended population: {e}"))?;

    log_diagnostics(engine.diagnostics());

    let report = engine.report();
    let rendered = match format {
        Format::Text => print::render_text(&report),
        Format::Json => print::render_json(&report)?,
    };

    finish(engine)?;

    print!("{rendered}");
    if format == Format::Json {
        println!();
    }
    Ok(())
}

fn run_globals(json: bool) -> Result<(), String> {
    let transport = WaylandTransport::connect()?;
    info!("connected to compositor");

    // Only the registry listing is needed; skip the xdg-output manager.
    let options = Options {
        extended: false,
        ..Options::default()
    };
    let mut engine = Engine::new(transport, options).map_err(|e| format!("{e}"))?;
    engine.discover().map_err(|e| format!("discovery: {e}"))?;

    let rendered = if json {
        print::render_globals_json(engine.globals())?
    } else {
        print::render_globals(engine.globals())
    };

    finish(engine)?;

    print!("{rendered}");
    if json {
        println!();
    }
    Ok(())
}

fn finish<T: Transport>(engine: Engine<T>) -> Result<(), String> {
    engine.teardown().map_err(|e| format!("teardown: {e}"))?;
    debug!("released all remote objects");
    Ok(())
}

fn log_diagnostics(d: &Diagnostics) {
    if d.dropped_outputs > 0 {
        warn!(
            "output limit reached: {} output(s) dropped",
            d.dropped_outputs
        );
    }
    if d.late_globals > 0 {
        warn!("{} global(s) advertised after discovery were not bound", d.late_globals);
    }
    if d.manager_rebinds > 0 {
        warn!("xdg-output manager advertised {} extra time(s)", d.manager_rebinds);
    }
    if d.stray_events > 0 {
        warn!("{} event(s) for unknown outputs ignored", d.stray_events);
    }
    debug!(
        "ignored {} global(s), {} removal(s)",
        d.ignored_globals, d.removed_globals
    );
}
