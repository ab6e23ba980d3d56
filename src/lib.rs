// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Deployment fix script generator.
//!
//! Fixscript embeds a local front-end source file, along with a level payload,
//! into a self-contained bash script. Running that script on the remote server
//! restores the file, creates the level through the admin API, and rebuilds
//! the admin application under its process supervisor.
//!
//! Fixscript never runs the script itself. It only produces the text, either
//! as one base64 blob on standard output, or as a file on disk.

pub mod config;
pub mod emit;
pub mod path;
pub mod payload;
pub mod script;
pub mod shell;

pub use config::{OutputSettings, Recipe, RemoteSettings, SourceSettings};
pub use emit::{emit, Emitted, OutputMode};
pub use payload::LevelPayload;
pub use script::{EmbeddedBlobs, Generator};
