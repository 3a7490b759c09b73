// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::InvalidInputError;

/// A failure inside a [`super::Projector`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Cannot project an empty set of positions")]
    NoPositions,

    #[error("The array position ({longitude_deg}°, {latitude_deg}°, {height_m} m) is not finite")]
    BadArrayPosition {
        longitude_deg: f64,
        latitude_deg: f64,
        height_m: f64,
    },

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelayError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
