// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading and querying antenna positions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Antenna configuration '{0}' doesn't have a recognised file extension! Valid extensions are: {}", *super::TELINFO_FILE_TYPES_COMMA_SEPARATED)]
    UnsupportedExt(PathBuf),

    #[error("Couldn't read antenna configuration '{path}': {err}")]
    Read { path: PathBuf, err: std::io::Error },

    #[error("Couldn't decode toml structure: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Couldn't decode json structure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The antenna configuration has no 'antennas' key")]
    NoAntennasKey,

    #[error("The antenna configuration's 'antennas' list is empty")]
    NoAntennas,

    #[error("Antenna entry {index} has no 'name'")]
    MissingName { index: usize },

    #[error("Antenna '{name}' has no 'position'")]
    MissingPosition { name: String },

    #[error("Antenna '{name}' has a position with {len} values; exactly 3 are required")]
    BadPositionLength { name: String, len: usize },

    #[error("Antenna '{name}' has a non-finite position value")]
    NonFinitePosition { name: String },

    #[error("Antenna name '{name}' appears more than once (names are case insensitive)")]
    DuplicateName { name: String },

    #[error("Couldn't parse {key} '{value}': {err}")]
    BadAngle {
        key: &'static str,
        value: String,
        err: String,
    },

    #[error("The array position needs all of 'latitude', 'longitude' and 'altitude', or none of them")]
    PartialArrayPosition,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Antenna '{name}' is not in the antenna configuration")]
    AntennaNotFound { name: String },

    #[error("Reference antenna '{reference}' is not one of the requested antennas")]
    ReferenceNotInSubset { reference: String },
}
