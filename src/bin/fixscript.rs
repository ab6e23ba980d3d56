// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use fixscript::{
    emit, path::default_recipe_path, EmbeddedBlobs, Emitted, Generator, OutputMode, Recipe,
};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use std::{fs, io, path::PathBuf, process::exit};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "fixscript [options] <fixscript-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to recipe file to use instead of the default one.
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<()> {
        match self.command {
            Command::Emit(opts) => run_emit(opts, load_recipe(self.config)?),
            Command::Write(opts) => run_write(opts, load_recipe(self.config)?),
            Command::Init(opts) => run_init(opts, self.config),
            Command::Inspect(opts) => run_inspect(opts),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print fix script as one base64 line.
    #[command(override_usage = "fixscript emit [options]")]
    Emit(EmitOptions),

    /// Write fix script to file.
    #[command(override_usage = "fixscript write [options]")]
    Write(WriteOptions),

    /// Write default recipe file.
    #[command(override_usage = "fixscript init [options]")]
    Init(InitOptions),

    /// Show blobs embedded in a fix script.
    #[command(override_usage = "fixscript inspect [options] <script>")]
    Inspect(InspectOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct EmitOptions {
    /// Source file to embed instead of the one in the recipe.
    #[arg(short, long, value_name = "path")]
    pub source: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct WriteOptions {
    /// Source file to embed instead of the one in the recipe.
    #[arg(short, long, value_name = "path")]
    pub source: Option<PathBuf>,

    /// Destination of fix script instead of the one in the recipe.
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct InitOptions {
    /// Overwrite existing recipe file.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct InspectOptions {
    /// Fix script to inspect.
    #[arg(required = true, value_name = "script")]
    pub script: PathBuf,

    /// Treat script as the base64 line printed by emit.
    #[arg(short, long)]
    pub encoded: bool,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time()
        .with_writer(io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn load_recipe(config: Option<PathBuf>) -> Result<Recipe> {
    let path = match config {
        Some(path) => path,
        None => match default_recipe_path() {
            Ok(path) if path.exists() => path,
            _ => {
                debug!("no recipe file found, use built-in recipe");
                return Ok(Recipe::default());
            }
        },
    };

    debug!("load recipe: {:?}", path.display());
    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read recipe at {:?}", path.display()))?;
    let recipe = data
        .parse::<Recipe>()
        .with_context(|| format!("failed to parse recipe at {:?}", path.display()))?;

    Ok(recipe)
}

fn run_emit(opts: EmitOptions, recipe: Recipe) -> Result<()> {
    let source = opts.source.unwrap_or(recipe.source.path);
    let generator = Generator::new(recipe.remote);
    emit(
        &generator,
        source,
        &recipe.payload,
        OutputMode::Stdout(&mut io::stdout().lock()),
    )?;

    Ok(())
}

fn run_write(opts: WriteOptions, recipe: Recipe) -> Result<()> {
    let source = opts.source.unwrap_or(recipe.source.path);
    let output = opts.output.unwrap_or(recipe.output.path);
    let generator = Generator::new(recipe.remote);
    let emitted = emit(
        &generator,
        source,
        &recipe.payload,
        OutputMode::File(output),
    )?;

    if let Emitted::File { path, bytes } = emitted {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("Created {name} with {bytes} bytes.");
    }

    Ok(())
}

fn run_init(opts: InitOptions, config: Option<PathBuf>) -> Result<()> {
    let path = match config {
        Some(path) => path,
        None => default_recipe_path()?,
    };

    if path.exists() && !opts.force {
        bail!("recipe already exists at {:?}, use --force to overwrite", path.display());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        mkdirp::mkdirp(parent)
            .with_context(|| format!("failed to create directory at {:?}", parent.display()))?;
    }

    fs::write(&path, Recipe::default().to_string())
        .with_context(|| format!("failed to write recipe at {:?}", path.display()))?;
    info!("initialize recipe: {:?}", path.display());

    Ok(())
}

fn run_inspect(opts: InspectOptions) -> Result<()> {
    let data = fs::read_to_string(&opts.script)
        .with_context(|| format!("failed to read fix script at {:?}", opts.script.display()))?;
    let script = if opts.encoded {
        String::from_utf8(
            STANDARD
                .decode(data.trim())
                .context("fix script is not a valid base64 line")?,
        )
        .context("decoded fix script is not valid UTF-8")?
    } else {
        data
    };

    let blobs = EmbeddedBlobs::extract(&script)?;
    let level = blobs.level()?;
    println!("source: {} bytes", blobs.source.len());
    println!("payload: {}", serde_json::to_string_pretty(&level)?);

    Ok(())
}
