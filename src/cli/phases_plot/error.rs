// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum PhasesPlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("beamphase was not compiled with the \"plotting\" feature.\nYou need to compile beamphase from source with this feature to plot phases.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("The plot output '{0}' must have a .png extension")]
    NotPng(std::path::PathBuf),

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(#[from] super::plotting::DrawError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
