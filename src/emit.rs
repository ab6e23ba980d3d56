// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Fix script output.
//!
//! A generated fix script leaves Fixscript in one of two ways. Either the whole
//! script is base64 encoded once more and printed as one line, ready to be
//! pasted into a remote terminal through `base64 -d | bash`, or the script is
//! written verbatim into a file on disk.

use crate::{
    payload::LevelPayload,
    script::{Generator, ScriptError},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// Where a generated fix script goes.
pub enum OutputMode<'a> {
    /// Print script as one base64 line to writer.
    Stdout(&'a mut dyn Write),

    /// Write script verbatim to file, overwriting it if it exists.
    File(PathBuf),
}

/// Outcome of emitting a fix script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Script was printed as base64 line.
    Stdout {
        /// Byte length of the script before encoding.
        bytes: usize,
    },

    /// Script was written to file.
    File {
        /// Path written to.
        path: PathBuf,

        /// Byte length written.
        bytes: usize,
    },
}

/// Generate fix script and send it to target output.
///
/// Generation completes before anything is written, so a failure leaves
/// neither a partial line on `stdout` nor a file on disk.
///
/// # Errors
///
/// - Return [`EmitError::Script`] if fix script generation fails.
/// - Return [`EmitError::WriteStdout`] if `stdout` cannot be written to.
/// - Return [`EmitError::CreateParent`] if parent directory of output file
///   cannot be created.
/// - Return [`EmitError::WriteFile`] if output file cannot be written.
#[instrument(skip_all, level = "debug")]
pub fn emit(
    generator: &Generator,
    source_path: impl AsRef<Path>,
    payload: &LevelPayload,
    mode: OutputMode<'_>,
) -> Result<Emitted> {
    let script = generator.generate(source_path, payload)?;

    match mode {
        OutputMode::Stdout(stdout) => {
            write_encoded(&script, stdout)?;
            Ok(Emitted::Stdout {
                bytes: script.len(),
            })
        }
        OutputMode::File(path) => {
            let bytes = write_script(&script, &path)?;
            Ok(Emitted::File { path, bytes })
        }
    }
}

/// Write script as one base64 line.
///
/// # Errors
///
/// - Return [`EmitError::WriteStdout`] if writer fails.
pub fn write_encoded(script: &str, stdout: &mut dyn Write) -> Result<()> {
    let encoded = STANDARD.encode(script);
    debug!("print {} encoded bytes", encoded.len());
    writeln!(stdout, "{encoded}")
        .and_then(|_| stdout.flush())
        .map_err(EmitError::WriteStdout)
}

/// Write script verbatim to file.
///
/// Returns number of bytes written, which is always `script.len()`.
///
/// # Errors
///
/// - Return [`EmitError::CreateParent`] if parent directory cannot be created.
/// - Return [`EmitError::WriteFile`] if file cannot be written.
pub fn write_script(script: &str, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        mkdirp::mkdirp(parent).map_err(|err| EmitError::CreateParent {
            source: err,
            path: parent.to_path_buf(),
        })?;
    }

    fs::write(path, script.as_bytes()).map_err(|err| EmitError::WriteFile {
        source: err,
        path: path.to_path_buf(),
    })?;
    info!("write {} bytes to {:?}", script.len(), path.display());

    Ok(script.len())
}

/// All possible error types for fix script output.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Fix script generation fails.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Encoded script cannot be printed.
    #[error("failed to write encoded fix script to stdout")]
    WriteStdout(#[source] std::io::Error),

    /// Parent directory of output file cannot be created.
    #[error("failed to create directory at {:?}", path.display())]
    CreateParent {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Output file cannot be written.
    #[error("failed to write fix script to {:?}", path.display())]
    WriteFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Friendly result alias :3
type Result<T, E = EmitError> = std::result::Result<T, E>;
