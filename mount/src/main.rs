mod adapter;
mod inode;

use clap::Parser;
use rvfs_core::{Config, Context};

/// Mount a copy-on-write versioning filesystem backed by a version store.
#[derive(Parser, Debug)]
#[command(name = "rvfs-mount", version, about)]
struct Cli {
    /// Where to attach the virtual filesystem.
    mountpoint: String,

    /// Version store root. Defaults to the RCS_VERSION_PATH environment
    /// variable when omitted.
    #[arg(long)]
    version_path: Option<String>,

    /// Run the mount in the foreground instead of daemonizing.
    #[arg(short, long)]
    foreground: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.version_path {
        Some(path) => Config::from_path(path.into()),
        None => Config::from_env(),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("rvfs-mount: {}", e);
        std::process::exit(1);
    });

    unsafe {
        libc::umask(0o077);
    }

    let ctx = Context::new(config);
    let fs = adapter::Adapter::new(ctx);

    let mut options = vec![fuser::MountOption::FSName("rvfs".to_string())];
    if !cli.foreground {
        options.push(fuser::MountOption::AutoUnmount);
    }

    log::info!("mounting at {}", cli.mountpoint);
    if let Err(e) = fuser::mount2(fs, &cli.mountpoint, &options) {
        eprintln!("rvfs-mount: mount failed: {}", e);
        std::process::exit(1);
    }
}
