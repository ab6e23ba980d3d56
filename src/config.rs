// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of the recipe file that Fixscript uses to simplify the
//! process of serialization and deserialization. File I/O is left to the
//! caller to figure out.
//!
//! # Recipe Layout
//!
//! A __recipe__ lists everything the generated script needs to know: where the
//! local source file lives, where it must be restored remotely, which endpoint
//! receives the level payload, and how to rebuild and restart the admin
//! application. Every section is optional. Missing sections and fields fall
//! back to the built-in defaults, so an empty recipe behaves exactly like
//! having no recipe at all.

use crate::payload::LevelPayload;

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Recipe for one fix script.
#[derive(Default, Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Recipe {
    /// Local file to embed.
    pub source: SourceSettings,

    /// Destination of the generated script in file mode.
    pub output: OutputSettings,

    /// Remote side of the generated script.
    pub remote: RemoteSettings,

    /// Level record to post to the admin API.
    pub payload: LevelPayload,
}

impl FromStr for Recipe {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut recipe: Recipe = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on local paths only.
        //   - Remote paths belong to the remote shell, not ours.
        recipe.source.path = expand_path(&recipe.source.path)?;
        recipe.output.path = expand_path(&recipe.output.path)?;

        // INVARIANT: Build command lands in the script verbatim, keep it LF only.
        if recipe.remote.build_command.contains('\r') {
            return Err(ConfigError::CarriageReturn);
        }

        Ok(recipe)
    }
}

impl Display for Recipe {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    Ok(shellexpand::full(path.to_string_lossy().as_ref())
        .map_err(ConfigError::ShellExpansion)?
        .into_owned()
        .into())
}

/// Local source file settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Path to the front-end file whose contents get embedded.
    pub path: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: "d:/new project/project3/frontend/admin-englishom/src/app/[locale]/admin/(protected)/layout.tsx".into(),
        }
    }
}

/// Generated script destination settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Path to write the generated script to in file mode.
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: "d:/new project/project3/fix_levels.sh".into(),
        }
    }
}

/// Remote side of the generated script.
///
/// These values are interpolated into the script as literal shell words,
/// except for [`RemoteSettings::build_command`] which is emitted verbatim.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Remote path the embedded source file is restored to.
    pub restore_path: String,

    /// Remote temporary file holding the decoded payload.
    pub payload_path: String,

    /// HTTPS endpoint receiving the payload as a POST body.
    pub endpoint: String,

    /// Remote directory of the admin application.
    pub app_dir: String,

    /// Build cache directory removed before rebuilding, relative to
    /// [`RemoteSettings::app_dir`].
    pub build_cache: String,

    /// Shell command that rebuilds the admin application.
    pub build_command: String,

    /// Name of the process restarted under pm2.
    pub process_name: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            restore_path: "/var/www/englishom/frontend/admin-englishom/src/app/[locale]/admin/(protected)/layout.tsx".into(),
            payload_path: "/tmp/level_payload.json".into(),
            endpoint: "https://api.englishom.com/api/courses/admin".into(),
            app_dir: "/var/www/englishom/frontend/admin-englishom".into(),
            build_cache: ".next".into(),
            build_command: "npm run build".into(),
            process_name: "admin-englishom".into(),
        }
    }
}

/// Configuration error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),

    /// Build command contains a carriage return.
    #[error("remote build command must not contain carriage returns")]
    CarriageReturn,
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
