// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for a phasing run.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.


use hifitime::{Duration, Epoch};
use log::debug;
use marlu::{c64, LatLngHeight, RADec, XyzGeocentric};
use ndarray::Array2;
use thiserror::Error;
use vec1::Vec1;

use crate::{
    antennas::{index_of, AntennaRegistry, LookupError},
    constants::{
        ATA_HEIGHT_M, ATA_LAT_DEG, ATA_LONG_DEG, DEFAULT_BANDWIDTH_HZ, DEFAULT_NUM_CHANNELS,
        DEFAULT_OBS_FREQ_HZ,
    },
    delays::{compute_beam_delays, compute_delays, DelayError, Projector, UvwProjector},
    phasors::phasor_matrix,
    InvalidInputError,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhasingParamsError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// Everything needed to get delays and phasors for a set of antennas looking
/// at a single direction at a single time.
#[derive(Debug, Clone)]
pub struct PhasingParams {
    /// The (uppercased) names of the antennas, in the order requested.
    pub antenna_names: Vec1<String>,

    /// The geocentric positions of the antennas \[metres\]. Parallel with
    /// `antenna_names`.
    pub antenna_xyzs: Vec1<XyzGeocentric>,

    /// The index of the reference antenna in `antenna_names`.
    pub ref_index: usize,

    /// The boresight.
    pub direction: RADec,

    /// Extra beams formed within the boresight's field. May be empty.
    pub beams: Vec<RADec>,

    pub epoch: Epoch,

    /// The location of the array. Positions are converted to geodetic XYZ
    /// about this.
    pub array_position: LatLngHeight,

    pub dut1: Duration,

    /// Should the array be precessed to J2000 before projecting?
    pub apply_precession: bool,

    /// The RF centre frequency of the band \[Hz\].
    pub obs_freq_hz: f64,

    pub bandwidth_hz: f64,

    pub num_channels: usize,
}

impl PhasingParams {
    /// Select antennas out of `registry`. If `antennas` is `None`, all
    /// antennas are used in the order they were loaded. If `ref_ant` is
    /// `None`, the first selected antenna is the reference.
    ///
    /// The array position comes from `registry` if it has one, otherwise
    /// it's the ATA. Everything else gets a default that can be changed
    /// afterwards.
    pub fn new<S: AsRef<str>>(
        registry: &AntennaRegistry,
        antennas: Option<&[S]>,
        ref_ant: Option<&str>,
        direction: RADec,
        epoch: Epoch,
    ) -> Result<PhasingParams, PhasingParamsError> {
        let (names, xyzs): (Vec<String>, Vec<XyzGeocentric>) = match antennas {
            Some(antennas) => registry
                .subset(antennas)?
                .into_iter()
                .map(|a| (a.name.to_string(), a.xyz))
                .unzip(),
            None => registry
                .names()
                .filter_map(|name| registry.get(name).map(|xyz| (name.to_string(), xyz)))
                .unzip(),
        };
        let antenna_names = Vec1::try_from_vec(names).map_err(|_| InvalidInputError::NoAntennas)?;
        let antenna_xyzs = Vec1::try_from_vec(xyzs).map_err(|_| InvalidInputError::NoAntennas)?;

        let ref_index = match ref_ant {
            Some(ref_ant) => index_of(antenna_names.as_slice(), ref_ant)?,
            None => 0,
        };
        let array_position = match registry.array_position() {
            Some(p) => p,
            None => {
                debug!("No array position in the antenna configuration; using the ATA");
                LatLngHeight {
                    longitude_rad: ATA_LONG_DEG.to_radians(),
                    latitude_rad: ATA_LAT_DEG.to_radians(),
                    height_metres: ATA_HEIGHT_M,
                }
            }
        };

        Ok(PhasingParams {
            antenna_names,
            antenna_xyzs,
            ref_index,
            direction,
            beams: vec![],
            epoch,
            array_position,
            dut1: Duration::default(),
            apply_precession: true,
            obs_freq_hz: DEFAULT_OBS_FREQ_HZ,
            bandwidth_hz: DEFAULT_BANDWIDTH_HZ,
            num_channels: DEFAULT_NUM_CHANNELS,
        })
    }

    pub fn ref_name(&self) -> &str {
        &self.antenna_names[self.ref_index]
    }

    pub fn ref_xyz(&self) -> XyzGeocentric {
        self.antenna_xyzs[self.ref_index]
    }

    /// The [`Projector`] described by these parameters.
    pub fn projector(&self) -> UvwProjector {
        UvwProjector::new(self.array_position, self.dut1, self.apply_precession)
    }

    /// Get the delay of every antenna relative to the reference antenna
    /// \[seconds\].
    pub fn delays(&self) -> Result<Vec<f64>, DelayError> {
        self.delays_with(&self.projector())
    }

    /// As [`PhasingParams::delays`], but with any [`Projector`].
    pub fn delays_with<P: Projector + ?Sized>(
        &self,
        projector: &P,
    ) -> Result<Vec<f64>, DelayError> {
        compute_delays(
            projector,
            self.epoch,
            self.direction,
            self.antenna_names.as_slice(),
            self.antenna_xyzs.as_slice(),
            self.ref_xyz(),
        )
    }

    /// Get the delays that steer each of the beams away from the boresight
    /// \[seconds\]. The result is `[beam][antenna]`.
    pub fn beam_delays(&self) -> Result<Array2<f64>, DelayError> {
        self.beam_delays_with(&self.projector())
    }

    /// As [`PhasingParams::beam_delays`], but with any [`Projector`].
    pub fn beam_delays_with<P: Projector + ?Sized>(
        &self,
        projector: &P,
    ) -> Result<Array2<f64>, DelayError> {
        compute_beam_delays(
            projector,
            self.epoch,
            self.direction,
            &self.beams,
            self.antenna_names.as_slice(),
            self.antenna_xyzs.as_slice(),
            self.ref_xyz(),
        )
    }

    /// Fringe-rate-corrected phasors for each of `delays` over this run's
    /// band. The result is `[antenna][channel]`.
    pub fn phasors(&self, delays: &[f64]) -> Result<Array2<c64>, InvalidInputError> {
        if delays.len() != self.antenna_names.len() {
            return Err(InvalidInputError::NamesPositionsMismatch {
                num_names: self.antenna_names.len(),
                num_positions: delays.len(),
            });
        }
        phasor_matrix(
            delays,
            self.num_channels,
            self.bandwidth_hz,
            Some(self.obs_freq_hz),
        )
    }
}
