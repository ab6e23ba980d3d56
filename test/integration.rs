// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::{run_fixscript, write_recipe};

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use fixscript::{EmbeddedBlobs, LevelPayload, Recipe};
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use std::{fs, path::Path};

#[sealed_test]
fn emit_prints_one_encoded_line() -> Result<()> {
    fs::write("layout.tsx", b"hello")?;
    let output = run_fixscript(["emit", "--source", "layout.tsx"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.ends_with('\n'));

    let script = String::from_utf8(STANDARD.decode(stdout.trim_end())?)?;
    assert!(script.starts_with("#!/bin/bash\n"));

    let blobs = EmbeddedBlobs::extract(&script)?;
    assert_eq!(blobs.source, b"hello");
    assert_eq!(blobs.level()?, LevelPayload::default());

    Ok(())
}

#[sealed_test]
fn write_creates_script_file() -> Result<()> {
    fs::write("layout.tsx", b"hello")?;
    let output = run_fixscript([
        "write",
        "--source",
        "layout.tsx",
        "--output",
        "fix_levels.sh",
    ])?;
    assert!(output.status.success());

    let script = fs::read_to_string("fix_levels.sh")?;
    assert!(!script.is_empty());
    assert!(!script.contains("\r\n"));
    assert_eq!(EmbeddedBlobs::extract(&script)?.source, b"hello");

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        format!("Created fix_levels.sh with {} bytes.\n", script.len())
    );

    Ok(())
}

#[sealed_test]
fn write_uses_recipe_file() -> Result<()> {
    fs::write("page.tsx", b"export default function Page() {}\n")?;
    write_recipe("recipe.toml", "page.tsx", "out/fix.sh")?;
    fs::write(
        "recipe.toml",
        fs::read_to_string("recipe.toml")?
            + "\n[remote]\nprocess_name = \"admin-staging\"\n\n[payload]\nlevel_name = \"B1\"\n",
    )?;

    let output = run_fixscript(["--config", "recipe.toml", "write"])?;
    assert!(output.status.success());

    let script = fs::read_to_string("out/fix.sh")?;
    assert!(script.contains("pm2 restart admin-staging\n"));

    let blobs = EmbeddedBlobs::extract(&script)?;
    assert_eq!(blobs.source, b"export default function Page() {}\n");
    assert_eq!(blobs.level()?.level_name, "B1");

    Ok(())
}

#[sealed_test]
fn missing_source_fails_without_output() -> Result<()> {
    for args in [
        vec!["emit", "--source", "missing.tsx"],
        vec!["write", "--source", "missing.tsx", "--output", "fix_levels.sh"],
    ] {
        let output = run_fixscript(args)?;
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8(output.stderr)?;
        assert!(stderr.contains("failed to read source file"));
        assert!(stderr.contains("No such file or directory"));
    }

    assert!(!Path::new("fix_levels.sh").exists());

    Ok(())
}

#[sealed_test]
fn init_writes_default_recipe() -> Result<()> {
    let output = run_fixscript(["--config", "conf/recipe.toml", "init"])?;
    assert!(output.status.success());

    let recipe: Recipe = fs::read_to_string("conf/recipe.toml")?.parse()?;
    assert_eq!(recipe, Recipe::default());

    let output = run_fixscript(["--config", "conf/recipe.toml", "init"])?;
    assert!(!output.status.success());

    let output = run_fixscript(["--config", "conf/recipe.toml", "init", "--force"])?;
    assert!(output.status.success());

    Ok(())
}

#[sealed_test]
fn inspect_reads_both_output_forms() -> Result<()> {
    fs::write("layout.tsx", b"hello")?;
    let emitted = run_fixscript(["emit", "--source", "layout.tsx"])?;
    fs::write("fix.b64", &emitted.stdout)?;
    run_fixscript(["write", "--source", "layout.tsx", "--output", "fix.sh"])?;

    let plain = run_fixscript(["inspect", "fix.sh"])?;
    let encoded = run_fixscript(["inspect", "--encoded", "fix.b64"])?;
    assert!(plain.status.success());
    assert!(encoded.status.success());

    let stdout = String::from_utf8(plain.stdout.clone())?;
    assert!(stdout.starts_with("source: 5 bytes\n"));
    assert!(stdout.contains("\"level_name\": \"A1\""));
    assert_eq!(plain.stdout, encoded.stdout);

    Ok(())
}
