mod opt;

use std::path::PathBuf;

use clap::Parser;
use opt::{Cli, Commands};
use rvfs_core::codec;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Show { vpath } => show(&cli.store, vpath),
        Commands::Versions { vpath } => versions(&cli.store, vpath),
    };
    if let Err(e) = result {
        eprintln!("rvfs-inspect: {}", e);
        std::process::exit(1);
    }
}

fn metadata_location(root: &PathBuf, vpath: &str) -> (PathBuf, String) {
    let (dir, basename) = rvfs_core::path::split_dir_base(vpath);
    let mut real = root.clone();
    for component in rvfs_core::path::split(&dir, '/') {
        real.push(component);
    }
    (real, basename)
}

fn show(root: &PathBuf, vpath: &str) -> std::io::Result<()> {
    let (dir, basename) = metadata_location(root, vpath);
    let metadata_file = dir.join(format!("metadata.{}", basename));
    let pin_file = dir.join(format!("dfl-meta.{}", basename));

    let parsed = codec::read_metadata(&metadata_file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let pin = codec::read_pin(&pin_file).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    match parsed {
        None => println!("{}: no metadata file", vpath),
        Some(parsed) => {
            println!("{} (deleted: {})", vpath, parsed.deleted);
            println!("pin: {:?}", pin);
            for v in &parsed.versions {
                println!(
                    "  vid={} svid={} mode={:04o} uid={} gid={} rfile={}",
                    v.vid,
                    v.svid,
                    v.mode,
                    v.uid,
                    v.gid,
                    v.rfile.display()
                );
            }
        }
    }
    Ok(())
}

fn versions(root: &PathBuf, vpath: &str) -> std::io::Result<()> {
    let (dir, basename) = metadata_location(root, vpath);
    let metadata_file = dir.join(format!("metadata.{}", basename));
    match codec::read_metadata(&metadata_file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    {
        None => println!("0"),
        Some(parsed) => println!("{}", parsed.versions.len()),
    }
    Ok(())
}
