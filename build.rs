//! This build script validates the default configuration file (`default_config.toml`)

#![allow(dead_code, reason = "Some items may be unused in this build script context")]
#![allow(unused_imports, reason = "Some items may be unused in this build script context")]

use ohno::IntoAppError;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;
use camino::Utf8PathBuf;
use std::env;
use std::process;

#[path = "src/config/mod.rs"]
mod config;

fn main() {
    match inner_main() {
        Ok(()) => {
            println!("cargo:rerun-if-changed=default_config.toml");
            println!("cargo:rerun-if-changed=src/config");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("unable to load default_config.toml: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let workspace_root = Utf8PathBuf::from(&manifest_dir);
    let config_path = workspace_root.join("default_config.toml");

    let _config = config::Config::load(&workspace_root, Some(&config_path)).into_app_err("unable to load default_config.toml")?;

    Ok(())
}
