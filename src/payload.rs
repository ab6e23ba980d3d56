// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Level payload layout.
//!
//! The admin API creates a course level from a small JSON record. The field
//! names follow the API exactly, including the odd one out: `level_name`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Course level record posted to the admin API.
///
/// Serialized field order matches declaration order, so the compact JSON form
/// is stable across runs.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelPayload {
    /// Arabic title.
    pub title_ar: String,

    /// English title.
    pub title_en: String,

    /// Arabic description.
    pub description_ar: String,

    /// English description.
    pub description_en: String,

    /// Price of the level.
    pub price: u64,

    /// Whether the level can be purchased.
    pub is_available: bool,

    /// Level identifier, e.g., "A1".
    #[serde(rename = "level_name")]
    pub level_name: String,
}

impl Default for LevelPayload {
    fn default() -> Self {
        Self {
            title_ar: "Level 1".into(),
            title_en: "Level 1".into(),
            description_ar: "Desc".into(),
            description_en: "Desc".into(),
            price: 100,
            is_available: true,
            level_name: "A1".into(),
        }
    }
}

impl LevelPayload {
    /// Serialize payload into compact JSON.
    ///
    /// # Errors
    ///
    /// - Return [`PayloadError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(PayloadError::Serialize)
    }

    /// Serialize payload into compact JSON, then base64 encode it.
    ///
    /// # Errors
    ///
    /// - Return [`PayloadError::Serialize`] if serialization fails.
    pub fn to_base64(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_json()?))
    }
}

impl FromStr for LevelPayload {
    type Err = PayloadError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(data).map_err(PayloadError::Deserialize)
    }
}

/// Payload error types.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Failed to serialize payload.
    #[error("failed to serialize level payload")]
    Serialize(#[source] serde_json::Error),

    /// Failed to deserialize payload.
    #[error("failed to deserialize level payload")]
    Deserialize(#[source] serde_json::Error),
}

/// Friendly result alias :3
type Result<T, E = PayloadError> = std::result::Result<T, E>;
