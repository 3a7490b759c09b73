// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::{borrow::Cow, path::PathBuf};

use clap::Parser;
use console::style;
use hifitime::{Duration, Epoch};
use log::{debug, log_enabled, trace, Level::Debug};
use marlu::{LatLngHeight, RADec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    InfoPrinter, Warn, ARRAY_POSITION_HELP, BANDWIDTH_HELP, CONFIG_PATH_HELP, NUM_CHANNELS_HELP,
    OBS_FREQ_HELP,
};
use crate::{
    antennas::{AntennaRegistry, ConfigError},
    constants::{
        DEFAULT_BANDWIDTH_HZ, DEFAULT_CONFIG_PATH, DEFAULT_NUM_CHANNELS, DEFAULT_OBS_FREQ_HZ,
    },
    params::{PhasingParams, PhasingParamsError},
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct PhasingArgs {
    #[clap(
        short,
        long,
        help = CONFIG_PATH_HELP.as_str(),
        help_heading = "ANTENNAS",
        parse(from_os_str)
    )]
    pub(crate) config_path: Option<PathBuf>,

    /// The antennas to phase up, in the order their delays are reported.
    /// Names are case insensitive. The default is to use all antennas in the
    /// antenna configuration.
    #[clap(short, long, multiple_values(true), help_heading = "ANTENNAS")]
    pub(crate) antennas: Option<Vec<String>>,

    /// The reference antenna; all delays are relative to this antenna. It
    /// must be one of the antennas being phased up. The default is the first
    /// antenna.
    #[clap(short, long, help_heading = "ANTENNAS")]
    pub(crate) ref_ant: Option<String>,

    /// The right ascension of the direction to phase up to [degrees].
    #[clap(long, help_heading = "POINTING")]
    pub(crate) ra: Option<f64>,

    /// The declination of the direction to phase up to [degrees].
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(crate) dec: Option<f64>,

    /// Also form a beam towards this direction (RA and Dec [degrees]). Its
    /// delays are reported relative to the boresight given by --ra and --dec.
    /// May be given more than once.
    #[clap(
        long = "beam",
        number_of_values = 2,
        multiple_occurrences(true),
        allow_hyphen_values = true,
        value_names = &["RA_DEG", "DEC_DEG"],
        help_heading = "POINTING"
    )]
    pub(crate) beams: Option<Vec<f64>>,

    /// The time of the observation [Unix seconds].
    #[clap(short, long, help_heading = "POINTING")]
    pub(crate) time: Option<f64>,

    /// Use this value as the DUT1 [seconds]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "POINTING")]
    pub(crate) dut1: Option<f64>,

    #[clap(
        long, help = ARRAY_POSITION_HELP.as_str(), help_heading = "POINTING",
        number_of_values = 3,
        allow_hyphen_values = true,
        value_names = &["LONG_DEG", "LAT_DEG", "HEIGHT_M"]
    )]
    pub(crate) array_position: Option<Vec<f64>>,

    /// Don't precess the array to J2000 before projecting baselines.
    #[clap(long, help_heading = "POINTING")]
    #[serde(default)]
    pub(crate) no_precession: bool,

    #[clap(long, help = OBS_FREQ_HELP.as_str(), help_heading = "BAND")]
    pub(crate) obs_freq: Option<f64>,

    #[clap(long, help = BANDWIDTH_HELP.as_str(), help_heading = "BAND")]
    pub(crate) bandwidth: Option<f64>,

    #[clap(long, help = NUM_CHANNELS_HELP.as_str(), help_heading = "BAND")]
    pub(crate) nchans: Option<usize>,
}

impl PhasingArgs {
    /// Combine two sets of arguments, preferring `self` where both have a
    /// value.
    pub(crate) fn merge(self, other: Self) -> Self {
        PhasingArgs {
            config_path: self.config_path.or(other.config_path),
            antennas: self.antennas.or(other.antennas),
            ref_ant: self.ref_ant.or(other.ref_ant),
            ra: self.ra.or(other.ra),
            dec: self.dec.or(other.dec),
            beams: self.beams.or(other.beams),
            time: self.time.or(other.time),
            dut1: self.dut1.or(other.dut1),
            array_position: self.array_position.or(other.array_position),
            no_precession: self.no_precession || other.no_precession,
            obs_freq: self.obs_freq.or(other.obs_freq),
            bandwidth: self.bandwidth.or(other.bandwidth),
            nchans: self.nchans.or(other.nchans),
        }
    }

    /// Check the arguments, read the antenna configuration and resolve
    /// everything into [`PhasingParams`]. Nothing is computed here.
    pub(crate) fn parse(self) -> Result<PhasingParams, PhasingArgsError> {
        let PhasingArgs {
            config_path,
            antennas,
            ref_ant,
            ra,
            dec,
            beams,
            time,
            dut1,
            array_position,
            no_precession,
            obs_freq,
            bandwidth,
            nchans,
        } = self;

        let direction = match (ra, dec) {
            (Some(ra), Some(dec)) => {
                // Verify that the input coordinates are sensible.
                if !(0.0..=360.0).contains(&ra) {
                    return Err(PhasingArgsError::RaInvalid);
                }
                if !(-90.0..=90.0).contains(&dec) {
                    return Err(PhasingArgsError::DecInvalid);
                }
                RADec::from_degrees(ra, dec)
            }
            (Some(_), None) | (None, Some(_)) => return Err(PhasingArgsError::OnlyOneRAOrDec),
            (None, None) => return Err(PhasingArgsError::NoDirection),
        };

        // Beams are flattened RA/Dec pairs.
        let beams = match beams {
            Some(v) => {
                if v.is_empty() || v.len() % 2 != 0 {
                    return Err(PhasingArgsError::BadBeams { values: v });
                }
                let mut beams = Vec::with_capacity(v.len() / 2);
                for pair in v.chunks_exact(2) {
                    let (ra, dec) = (pair[0], pair[1]);
                    if !(0.0..=360.0).contains(&ra) || !(-90.0..=90.0).contains(&dec) {
                        return Err(PhasingArgsError::BeamInvalid { ra, dec });
                    }
                    beams.push(RADec::from_degrees(ra, dec));
                }
                beams
            }
            None => vec![],
        };

        let epoch = match time {
            Some(t) if t.is_finite() => {
                // hifitime saturates times it can't represent rather than
                // failing, so check that the time survives the conversion.
                let epoch = Epoch::from_unix_seconds(t);
                if (epoch.to_unix_seconds() - t).abs() > 2.0 {
                    return Err(PhasingArgsError::BadTime(t));
                }
                epoch
            }
            Some(t) => return Err(PhasingArgsError::BadTime(t)),
            None => return Err(PhasingArgsError::NoTime),
        };
        let dut1 = match dut1 {
            Some(d) if d.is_finite() => Duration::from_seconds(d),
            Some(d) => return Err(PhasingArgsError::BadDut1(d)),
            None => Duration::default(),
        };

        // If the user supplied the array position, unpack it here.
        let array_position = match array_position {
            Some(v) => {
                if v.len() != 3 || !v.iter().all(|f| f.is_finite()) {
                    return Err(PhasingArgsError::BadArrayPosition { pos: v });
                }
                Some(LatLngHeight {
                    longitude_rad: v[0].to_radians(),
                    latitude_rad: v[1].to_radians(),
                    height_metres: v[2],
                })
            }
            None => None,
        };

        let obs_freq_hz = obs_freq.unwrap_or(DEFAULT_OBS_FREQ_HZ);
        if !obs_freq_hz.is_finite() {
            return Err(PhasingArgsError::BadObsFreq(obs_freq_hz));
        }
        let bandwidth_hz = bandwidth.unwrap_or(DEFAULT_BANDWIDTH_HZ);
        if !(bandwidth_hz.is_finite() && bandwidth_hz > 0.0) {
            return Err(PhasingArgsError::BadBandwidth(bandwidth_hz));
        }
        let num_channels = nchans.unwrap_or(DEFAULT_NUM_CHANNELS);
        if num_channels == 0 {
            return Err(PhasingArgsError::ZeroChannels);
        }
        if matches!(&antennas, Some(a) if a.is_empty()) {
            return Err(PhasingArgsError::NoAntennas);
        }

        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let registry = AntennaRegistry::load(&config_path)?;
        let mut params = PhasingParams::new(
            &registry,
            antennas.as_deref(),
            ref_ant.as_deref(),
            direction,
            epoch,
        )?;
        if ref_ant.is_none() {
            format!(
                "No reference antenna was specified; using {}",
                params.ref_name()
            )
            .warn();
        }
        match (array_position, registry.array_position()) {
            (Some(p), _) => params.array_position = p,
            (None, Some(_)) => (),
            (None, None) => {
                "The antenna configuration has no array position; assuming the ATA".warn()
            }
        }
        params.beams = beams;
        params.dut1 = dut1;
        params.apply_precession = !no_precession;
        params.obs_freq_hz = obs_freq_hz;
        params.bandwidth_hz = bandwidth_hz;
        params.num_channels = num_channels;

        let mut ant_printer = InfoPrinter::new("Antennas".into());
        ant_printer.push_line(
            format!(
                "Using {} of {} antennas from {}",
                params.antenna_names.len(),
                registry.len(),
                config_path.display()
            )
            .into(),
        );
        ant_printer.push_line(format!("Reference antenna: {}", params.ref_name()).into());
        if log_enabled!(Debug) {
            ant_printer.push_block(
                params
                    .antenna_names
                    .iter()
                    .zip(params.antenna_xyzs.iter())
                    .map(|(name, xyz)| {
                        Cow::from(format!("{name:>4}: {:.4} {:.4} {:.4}", xyz.x, xyz.y, xyz.z))
                    })
                    .collect(),
            );
        }
        ant_printer.display();

        let mut coord_printer = InfoPrinter::new("Coordinates".into());
        coord_printer.push_block(vec![
            style("                   RA        Dec").bold().to_string().into(),
            format!(
                "Direction:         {:>8.4}° {:>8.4}°",
                params.direction.ra.to_degrees(),
                params.direction.dec.to_degrees()
            )
            .into(),
        ]);
        if !params.beams.is_empty() {
            coord_printer.push_block(
                params
                    .beams
                    .iter()
                    .enumerate()
                    .map(|(i, beam)| {
                        Cow::from(format!(
                            "Beam {i:<12} {:>8.4}° {:>8.4}°",
                            beam.ra.to_degrees(),
                            beam.dec.to_degrees()
                        ))
                    })
                    .collect(),
            );
        }
        coord_printer.push_block(vec![
            format!(
                "Array position:    {:>8.4}° {:>8.4}° {:.4}m",
                params.array_position.longitude_rad.to_degrees(),
                params.array_position.latitude_rad.to_degrees(),
                params.array_position.height_metres
            )
            .into(),
            style("                   Longitude Latitude  Height")
                .bold()
                .to_string()
                .into(),
        ]);
        coord_printer.push_block(vec![
            format!("Time: {} (Unix {})", params.epoch, params.epoch.to_unix_seconds()).into(),
            format!("DUT1: {} s", params.dut1.to_seconds()).into(),
            format!(
                "Precessing to J2000: {}",
                if params.apply_precession { "yes" } else { "no" }
            )
            .into(),
        ]);
        coord_printer.display();

        let mut band_printer = InfoPrinter::new("Band".into());
        band_printer.push_block(vec![
            format!("Centre frequency: {} MHz", params.obs_freq_hz / 1e6).into(),
            format!("Bandwidth:        {} MHz", params.bandwidth_hz / 1e6).into(),
            format!(
                "Channels:         {} ({} kHz each)",
                params.num_channels,
                params.bandwidth_hz / params.num_channels as f64 / 1e3
            )
            .into(),
        ]);
        band_printer.display();

        trace!("{params:#?}");
        debug!("Parsed phasing arguments");
        Ok(params)
    }
}

#[derive(Error, Debug)]
pub(crate) enum PhasingArgsError {
    #[error("No direction was given; both --ra and --dec are required")]
    NoDirection,

    #[error("Right Ascension was not within 0 to 360!")]
    RaInvalid,

    #[error("Declination was not within -90 to 90!")]
    DecInvalid,

    #[error("One of RA and Dec was specified, but both are required!")]
    OnlyOneRAOrDec,

    #[error("Beams must be given as pairs of RA and Dec; got {values:?}")]
    BadBeams { values: Vec<f64> },

    #[error("Beam direction ({ra}, {dec}) is invalid; RA must be within 0 to 360 and Dec within -90 to 90")]
    BeamInvalid { ra: f64, dec: f64 },

    #[error("No observation time was given; --time [Unix seconds] is required")]
    NoTime,

    #[error("The observation time {0} is not a valid Unix time")]
    BadTime(f64),

    #[error("The DUT1 must be finite; got {0}")]
    BadDut1(f64),

    #[error("Array position specified as {pos:?}, not [<Longitude>, <Latitude>, <Height>]")]
    BadArrayPosition { pos: Vec<f64> },

    #[error("The observing frequency must be finite; got {0} Hz")]
    BadObsFreq(f64),

    #[error("The bandwidth must be positive; got {0} Hz")]
    BadBandwidth(f64),

    #[error("Number of channels cannot be 0!")]
    ZeroChannels,

    #[error("An empty list of antennas was given")]
    NoAntennas,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Params(#[from] PhasingParamsError),
}
