// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Geometric delays and channelised phasors for phasing up a radio-interferometer
array.

Antenna positions are read into an [`AntennaRegistry`], projected towards a
pointing direction at an epoch to get per-antenna delays relative to a
reference antenna ([`compute_delays`]), and each delay is expanded into
per-channel phase-correction factors ([`make_phasors`], [`fringe_rate`]).
 */

pub mod antennas;
pub mod circle;
mod cli;
pub mod constants;
pub mod delays;
pub mod error;
pub mod params;
pub mod phasors;

// Re-exports.
pub use antennas::{index_of, AntennaPosition, AntennaRegistry, ConfigError, LookupError};
pub use circle::points_on_circle;
pub use cli::{Beamphase, BeamphaseError};
pub use delays::{
    compute_beam_delays, compute_delays, DelayError, ProjectionError, Projector, UvwProjector,
};
pub use error::InvalidInputError;
pub use params::{PhasingParams, PhasingParamsError};
pub use phasors::{channel_freqs, corrected_phasors, fringe_rate, make_phasors, phasor_matrix};

// External re-exports.
pub use hifitime;
pub use marlu;
pub use ndarray;
