// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Fix script generation.
//!
//! A __fix script__ is a self-contained bash script that carries two base64
//! blobs: the contents of a local front-end source file, and a level payload.
//! When executed on the remote server, it performs the following steps in
//! order:
//!
//! 1. Decode the first blob back into the source file at its remote path.
//! 2. Decode the second blob into a temporary JSON file.
//! 3. POST that JSON file to the admin API through curl.
//! 4. Remove the build cache of the admin application.
//! 5. Rebuild the admin application.
//! 6. Restart the admin application under pm2.
//!
//! Nothing in the script is executed here. Generation is a pure function of the
//! source file contents, the payload, and the [`RemoteSettings`].

use crate::{
    config::RemoteSettings,
    payload::{LevelPayload, PayloadError},
    shell,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

const BLOB_PREFIX: &str = "echo \"";
const BLOB_DECODE: &str = "\" | base64 -d > ";

/// Fix script generator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Generator {
    remote: RemoteSettings,
}

impl Generator {
    /// Construct new generator targeting given remote settings.
    pub fn new(remote: RemoteSettings) -> Self {
        Self { remote }
    }

    /// Generate fix script for source file and payload.
    ///
    /// Reads the entire source file up front. Nothing is rendered unless that
    /// read succeeds.
    ///
    /// # Errors
    ///
    /// - Return [`ScriptError::SourceUnreadable`] if source file cannot be
    ///   read for any reason.
    /// - Return [`ScriptError::Payload`] if payload cannot be serialized.
    #[instrument(skip(self, source_path, payload), level = "debug")]
    pub fn generate(&self, source_path: impl AsRef<Path>, payload: &LevelPayload) -> Result<String> {
        let source_path = source_path.as_ref();
        debug!("read source file: {:?}", source_path.display());
        let contents = fs::read(source_path).map_err(|err| ScriptError::SourceUnreadable {
            source: err,
            path: source_path.to_path_buf(),
        })?;

        let source_b64 = STANDARD.encode(&contents);
        let payload_b64 = payload.to_base64()?;
        info!(
            "embed {} bytes from {:?} and level {:?}",
            contents.len(),
            source_path.display(),
            payload.level_name
        );

        Ok(self.render(&source_b64, &payload_b64))
    }

    /// Render fix script from already encoded blobs.
    pub fn render(&self, source_b64: &str, payload_b64: &str) -> String {
        let remote = &self.remote;
        let file_name = Path::new(&remote.restore_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| remote.restore_path.clone());
        let payload_path = shell::escape(&remote.payload_path);

        format!(
            r##"#!/bin/bash
echo {restoring}
{BLOB_PREFIX}{source_b64}{BLOB_DECODE}{restore_path}

echo "Creating Level Payload..."
{BLOB_PREFIX}{payload_b64}{BLOB_DECODE}{payload_path}

echo "Creating Level via API..."
curl -v -X POST {endpoint} -H "Content-Type: application/json" -d @{payload_path}

echo "Rebuilding Admin..."
cd {app_dir}
rm -rf {build_cache}
{build_command}
pm2 restart {process_name}
echo "Done!"
"##,
            restoring = shell::double_quote(format!("Restoring {file_name}...")),
            restore_path = shell::escape(&remote.restore_path),
            endpoint = shell::escape(&remote.endpoint),
            app_dir = shell::escape(&remote.app_dir),
            build_cache = shell::escape(&remote.build_cache),
            build_command = remote.build_command,
            process_name = shell::escape(&remote.process_name),
        )
    }
}

/// Blobs embedded in a generated fix script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedBlobs {
    /// Decoded source file contents.
    pub source: Vec<u8>,

    /// Decoded payload JSON.
    pub payload: Vec<u8>,
}

impl EmbeddedBlobs {
    /// Extract and decode both blobs from fix script text.
    ///
    /// The first `echo "<blob>" | base64 -d > <path>` line holds the source
    /// file, the second holds the payload.
    ///
    /// # Errors
    ///
    /// - Return [`ScriptError::MissingBlob`] if script carries fewer than two
    ///   blobs.
    /// - Return [`ScriptError::Decode`] if a blob is not valid base64.
    pub fn extract(script: &str) -> Result<Self> {
        let mut blobs = script.lines().filter_map(|line| {
            line.strip_prefix(BLOB_PREFIX)?
                .split_once(BLOB_DECODE)
                .map(|(blob, _)| blob)
        });

        let source = blobs.next().ok_or(ScriptError::MissingBlob("source"))?;
        let payload = blobs.next().ok_or(ScriptError::MissingBlob("payload"))?;

        Ok(Self {
            source: decode_blob("source", source)?,
            payload: decode_blob("payload", payload)?,
        })
    }

    /// Parse embedded payload as level record.
    ///
    /// # Errors
    ///
    /// - Return [`ScriptError::Utf8`] if payload is not valid UTF-8.
    /// - Return [`ScriptError::Payload`] if payload does not match the level
    ///   record layout.
    pub fn level(&self) -> Result<LevelPayload> {
        Ok(std::str::from_utf8(&self.payload)?.parse()?)
    }
}

fn decode_blob(name: &'static str, blob: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(blob)
        .map_err(|err| ScriptError::Decode { source: err, blob: name })
}

/// All possible error types for fix script handling.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Source file cannot be read.
    #[error("failed to read source file at {:?}", path.display())]
    SourceUnreadable {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Payload serialization or parsing fails.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Script does not carry an expected blob.
    #[error("fix script does not embed a {0} blob")]
    MissingBlob(&'static str),

    /// Embedded blob is not valid base64.
    #[error("failed to decode embedded {blob} blob")]
    Decode {
        #[source]
        source: base64::DecodeError,
        blob: &'static str,
    },

    /// Embedded payload is not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Friendly result alias :3
type Result<T, E = ScriptError> = std::result::Result<T, E>;
