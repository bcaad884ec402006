// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use prodbook::{cli, commands, store};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let backend = matches.get_one::<String>("backend").unwrap();
    let data_dir = match matches.get_one::<PathBuf>("data-dir") {
        Some(d) => d.clone(),
        None => store::default_data_dir()?,
    };
    let store = store::open(backend, Some(data_dir.clone()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized ({} backend) at {}", backend, data_dir.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(store.as_ref(), sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(store.as_ref(), sub)?,
        Some(("target", sub)) => commands::targets::handle(store.as_ref(), sub)?,
        Some(("export", sub)) => commands::exporter::handle(store.as_ref(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
