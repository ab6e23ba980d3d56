// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

mod integration;

use anyhow::Result;
use std::{
    env,
    path::Path,
    process::{Command, Output},
};

/// Run fixscript binary inside current directory.
///
/// Configuration lookups are pinned to the current directory, so a recipe in
/// the real user configuration never leaks into a test.
pub(crate) fn run_fixscript(args: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Output> {
    let cwd = env::current_dir()?;
    let output = Command::new(env!("CARGO_BIN_EXE_fixscript"))
        .args(args.into_iter().map(|arg| arg.as_ref().to_owned()))
        .env("XDG_CONFIG_HOME", cwd.join("xdg"))
        .env("RUST_LOG", "info")
        .output()?;

    Ok(output)
}

/// Write recipe pointing at local source and output files.
pub(crate) fn write_recipe(path: impl AsRef<Path>, source: &str, output: &str) -> Result<()> {
    std::fs::write(
        path.as_ref(),
        format!("[source]\npath = \"{source}\"\n\n[output]\npath = \"{output}\"\n"),
    )?;

    Ok(())
}
