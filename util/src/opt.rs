use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rvfs-inspect", version, about)]
pub struct Cli {
    /// Version store root (the directory RCS_VERSION_PATH would point at).
    #[arg(long, global = true, default_value = ".")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dump a virtual path's metadata and pin state.
    Show { vpath: String },
    /// Print the number of retained versions for a virtual path.
    Versions { vpath: String },
}
