//! `build-config` — resolve Supabase credentials and generate `sdk/config.js`.
//!
//! Takes no arguments; operates on the current working directory.
//!
//! Sources, in priority order: real environment variables (`VITE_`-prefixed
//! or unprefixed names), a `.env` file at the project root, and the sidecar
//! of a previous build (development only). Exit code 0 on success, 1 on any
//! resolution or write failure.

use std::process;

use supablog::{artifact, env::EnvSnapshot, error::AppError, logger, paths::SitePaths, resolve};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    logger::init("info")?;

    let root = std::env::current_dir()?;
    let paths = SitePaths::new(&root);
    let env = EnvSnapshot::from_process();

    let credentials = resolve::resolve(&env, &paths)?;
    let out = artifact::write(&paths, &credentials)?;

    println!("✅ config.js generated");
    println!("   location: {}", out.display());
    Ok(())
}
