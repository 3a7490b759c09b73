// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all beamphase-related errors. This should be the *only*
//! error enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::{common::PhasingArgsError, phases_plot::PhasesPlotError};
use crate::{
    antennas::{ConfigError, LookupError},
    delays::DelayError,
    params::PhasingParamsError,
    InvalidInputError,
};

/// The *only* publicly visible error from the beamphase binary. The variant
/// says what kind of problem stopped the run.
#[derive(Error, Debug)]
pub enum BeamphaseError {
    /// The antenna configuration couldn't be read or didn't make sense.
    #[error("{0}\n\nCheck the antenna configuration file (--config-path)")]
    Config(String),

    /// A requested antenna isn't available.
    #[error("{0}")]
    Lookup(String),

    /// Inputs with the wrong shape or out of range.
    #[error("{0}")]
    InvalidInput(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// An error related to phases-plot.
    #[error("{0}")]
    PhasesPlot(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<PhasingArgsError> for BeamphaseError {
    fn from(e: PhasingArgsError) -> Self {
        let s = e.to_string();
        match e {
            PhasingArgsError::NoDirection
            | PhasingArgsError::RaInvalid
            | PhasingArgsError::DecInvalid
            | PhasingArgsError::OnlyOneRAOrDec
            | PhasingArgsError::BadBeams { .. }
            | PhasingArgsError::BeamInvalid { .. }
            | PhasingArgsError::NoTime
            | PhasingArgsError::BadTime(_)
            | PhasingArgsError::BadDut1(_)
            | PhasingArgsError::BadArrayPosition { .. }
            | PhasingArgsError::BadObsFreq(_)
            | PhasingArgsError::BadBandwidth(_)
            | PhasingArgsError::ZeroChannels
            | PhasingArgsError::NoAntennas => Self::InvalidInput(s),
            PhasingArgsError::Config(e) => Self::from(e),
            PhasingArgsError::Params(e) => Self::from(e),
        }
    }
}

impl From<PhasingParamsError> for BeamphaseError {
    fn from(e: PhasingParamsError) -> Self {
        match e {
            PhasingParamsError::Lookup(e) => Self::from(e),
            PhasingParamsError::InvalidInput(e) => Self::from(e),
        }
    }
}

impl From<PhasesPlotError> for BeamphaseError {
    fn from(e: PhasesPlotError) -> Self {
        let s = e.to_string();
        match e {
            #[cfg(not(feature = "plotting"))]
            PhasesPlotError::NoPlottingFeature => Self::PhasesPlot(s),
            #[cfg(feature = "plotting")]
            PhasesPlotError::NotPng(_) | PhasesPlotError::Draw(_) => Self::PhasesPlot(s),
            PhasesPlotError::IO(_) => Self::Generic(s),
        }
    }
}

// Library errors.

impl From<ConfigError> for BeamphaseError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<LookupError> for BeamphaseError {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e.to_string())
    }
}

impl From<InvalidInputError> for BeamphaseError {
    fn from(e: InvalidInputError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<DelayError> for BeamphaseError {
    fn from(e: DelayError) -> Self {
        match e {
            DelayError::InvalidInput(e) => Self::from(e),
            DelayError::Projection(_) => Self::Generic(e.to_string()),
        }
    }
}

impl From<std::io::Error> for BeamphaseError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
