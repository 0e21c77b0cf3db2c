// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wlinfo", version, about = "wlinfo — list Wayland outputs.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/wlinfo/wlinfo.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/wlinfo/wlinfo.rune)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Describe every output (default)
    Outputs(OutputsArgs),

    /// List every global the compositor advertises
    Globals {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct OutputsArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Don't query xdg-output logical metadata
    #[arg(long)]
    pub no_extended: bool,

    /// Stop recording outputs after this many
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_outputs: Option<u32>,
}

impl Args {
    pub fn resolved_cmd(&self) -> Cmd {
        match &self.cmd {
            Some(Cmd::Outputs(o)) => Cmd::Outputs(OutputsArgs {
                json: o.json,
                no_extended: o.no_extended,
                max_outputs: o.max_outputs,
            }),
            Some(Cmd::Globals { json }) => Cmd::Globals { json: *json },
            None => Cmd::Outputs(OutputsArgs::default()),
        }
    }
}
