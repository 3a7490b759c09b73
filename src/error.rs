// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors for inputs that don't have the right shape or range.

use thiserror::Error;

/// Shape, length or range problems with the inputs to the delay engine or
/// the phasor synthesiser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("Got {num_names} antenna names but {num_positions} antenna positions")]
    NamesPositionsMismatch {
        num_names: usize,
        num_positions: usize,
    },

    #[error("No antennas were supplied")]
    NoAntennas,

    #[error("The reference position ({x}, {y}, {z}) is not one of the antenna positions")]
    ReferenceNotInPositions { x: f64, y: f64, z: f64 },

    #[error("No beam directions were supplied")]
    NoBeams,

    #[error("The projection returned {got} vectors for {expected} antennas")]
    ProjectionLength { expected: usize, got: usize },

    #[error("The number of channels cannot be 0")]
    ZeroChannels,

    #[error("The bandwidth must be positive and finite; got {0} Hz")]
    BadBandwidth(f64),

    #[error("The centre frequency must be finite; got {0} Hz")]
    BadCentreFreq(f64),

    #[error("Delays must be finite; got {0} s")]
    NonFiniteDelay(f64),
}
