//! flatstore_demo - runs every round-trip scenario against a scratch directory.
//!
//! Exits with 0 when all of them hold. Set `RUST_LOG=debug` to see each value.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use flatstore::{FlatStore, Framing, StoreOptions};
use log::{info, warn};
use tempfile::TempDir;

mod scenarios;

use scenarios::{BLOB_NAME, run_all};

#[derive(Parser)]
#[command(name = "flatstore_demo")]
#[command(about = "Round-trips plain-data values through flatstore")]
#[command(version)]
struct Cli {
    /// Directory to write blobs to (defaults to a temporary one)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// On-disk framing
    #[arg(short, long, default_value = "prefixed")]
    framing: FramingArg,

    /// Sync each blob to disk before closing it
    #[arg(long)]
    sync: bool,

    /// Keep the blob instead of deleting it at the end
    #[arg(long)]
    keep: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum FramingArg {
    Prefixed,
    None,
}

impl From<FramingArg> for Framing {
    fn from(value: FramingArg) -> Self {
        match value {
            FramingArg::Prefixed => Framing::LengthPrefixed,
            FramingArg::None => Framing::None,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let options = StoreOptions::from(Framing::from(cli.framing)).with_sync(cli.sync);

    // Held until the end of main so the scratch directory outlives the run.
    let (temp, root) = match cli.dir {
        Some(dir) => (None, dir),
        None => {
            let temp = TempDir::new()?;
            let root = temp.path().to_owned();
            (Some(temp), root)
        }
    };

    let store = FlatStore::open_with_options(&root, options)?;
    let count = run_all(&store)?;
    info!("{count} scenarios passed ({}).", options.framing);

    if cli.keep {
        let kept = match temp {
            Some(temp) => temp.keep(),
            None => root,
        };
        info!("Blob kept at {}.", kept.join(BLOB_NAME).display());
    } else if !store.file_delete(BLOB_NAME) {
        warn!("Blob left at {}.", store.path(BLOB_NAME).display());
    }

    println!("{count} scenarios passed");
    Ok(())
}
