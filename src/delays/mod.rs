// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Geometric delays of antennas relative to a reference antenna.
//!
//! The astronomy (Earth orientation, precession, hour angles) lives behind
//! the [`Projector`] trait; the delay engine itself only validates its inputs
//! and divides the line-of-sight projection by the speed of light.
//!
//! When the array is pointed at a boresight, extra beams can be formed
//! towards other directions. [`compute_beam_delays`] gives the delays that
//! steer each beam away from the boresight.

mod error;

pub use error::{DelayError, ProjectionError};

use hifitime::{Duration, Epoch};
use log::{debug, trace};
use marlu::{
    precession::{get_lmst, precess_time},
    LatLngHeight, RADec, XyzGeocentric, XyzGeodetic, UVW,
};

use ndarray::prelude::*;

use crate::{constants::VEL_C, InvalidInputError};

/// Something that can project antenna baselines onto a direction on the sky.
pub trait Projector {
    /// For each of `positions`, get the [`UVW`] of its baseline with
    /// `reference` when looking towards `direction` at `epoch`. `w` is the
    /// component along the line of sight \[metres\]. There must be one
    /// [`UVW`] per position, in the same order.
    fn project(
        &self,
        epoch: Epoch,
        direction: RADec,
        positions: &[XyzGeocentric],
        reference: XyzGeocentric,
    ) -> Result<Vec<UVW>, ProjectionError>;
}

/// A [`Projector`] that uses `marlu` to convert geocentric positions into
/// [`UVW`]s, optionally precessing the array to J2000 first.
#[derive(Debug, Clone, Copy)]
pub struct UvwProjector {
    array_position: LatLngHeight,
    dut1: Duration,
    precess: bool,
}

impl UvwProjector {
    pub fn new(array_position: LatLngHeight, dut1: Duration, precess: bool) -> UvwProjector {
        UvwProjector {
            array_position,
            dut1,
            precess,
        }
    }
}

impl Projector for UvwProjector {
    fn project(
        &self,
        epoch: Epoch,
        direction: RADec,
        positions: &[XyzGeocentric],
        reference: XyzGeocentric,
    ) -> Result<Vec<UVW>, ProjectionError> {
        let LatLngHeight {
            longitude_rad,
            latitude_rad,
            height_metres,
        } = self.array_position;
        if positions.is_empty() {
            return Err(ProjectionError::NoPositions);
        }
        if ![longitude_rad, latitude_rad, height_metres]
            .iter()
            .all(|f| f.is_finite())
        {
            return Err(ProjectionError::BadArrayPosition {
                longitude_deg: longitude_rad.to_degrees(),
                latitude_deg: latitude_rad.to_degrees(),
                height_m: height_metres,
            });
        }

        // Geocentric to geodetic about the array position. The reference
        // goes on the end.
        let vec = XyzGeocentric::get_geocentric_vector(self.array_position);
        let (s_long, c_long) = longitude_rad.sin_cos();
        let xyzs: Vec<XyzGeodetic> = positions
            .iter()
            .chain(std::iter::once(&reference))
            .map(|xyz| xyz.to_geodetic_inner(vec, s_long, c_long))
            .collect();

        let (lst, xyzs) = if self.precess {
            let precession_info =
                precess_time(longitude_rad, latitude_rad, direction, epoch, self.dut1);
            debug!(
                "Projecting at {epoch}, LMST {}°, J2000 LMST {}°",
                precession_info.lmst.to_degrees(),
                precession_info.lmst_j2000.to_degrees()
            );
            (
                precession_info.lmst_j2000,
                precession_info.precess_xyz(&xyzs),
            )
        } else {
            let lst = get_lmst(longitude_rad, epoch, self.dut1);
            debug!("Projecting at {epoch}, LMST {}°", lst.to_degrees());
            (lst, xyzs)
        };
        let hadec = direction.to_hadec(lst);
        trace!("HA {}°, Dec {}°", hadec.ha.to_degrees(), hadec.dec.to_degrees());

        match xyzs.split_last() {
            Some((&reference, xyzs)) if !xyzs.is_empty() => Ok(xyzs
                .iter()
                .map(|&xyz| UVW::from_xyz(xyz - reference, hadec))
                .collect()),
            _ => Err(ProjectionError::NoPositions),
        }
    }
}

/// Get the geometric delay \[seconds\] of each antenna relative to the
/// reference antenna when pointed at `direction` at `epoch`.
///
/// `names` and `positions` are parallel; `reference_position` must be one of
/// `positions`. A positive line-of-sight offset gives a positive delay. The
/// reference antenna's own delay is whatever `projector` says it is; it is
/// not forced to zero.
///
/// # Errors
///
/// [`InvalidInputError`]s are returned if the names and positions have
/// different lengths, there are no antennas, the reference isn't one of the
/// positions or the projector doesn't return one vector per antenna. Errors
/// from the projector are passed through.
pub fn compute_delays<P, S>(
    projector: &P,
    epoch: Epoch,
    direction: RADec,
    names: &[S],
    positions: &[XyzGeocentric],
    reference_position: XyzGeocentric,
) -> Result<Vec<f64>, DelayError>
where
    P: Projector + ?Sized,
    S: AsRef<str>,
{
    if names.len() != positions.len() {
        return Err(InvalidInputError::NamesPositionsMismatch {
            num_names: names.len(),
            num_positions: positions.len(),
        }
        .into());
    }
    if positions.is_empty() {
        return Err(InvalidInputError::NoAntennas.into());
    }
    if !positions
        .iter()
        .any(|p| same_position(p, &reference_position))
    {
        return Err(InvalidInputError::ReferenceNotInPositions {
            x: reference_position.x,
            y: reference_position.y,
            z: reference_position.z,
        }
        .into());
    }

    let uvws = projector.project(epoch, direction, positions, reference_position)?;
    if uvws.len() != positions.len() {
        return Err(InvalidInputError::ProjectionLength {
            expected: positions.len(),
            got: uvws.len(),
        }
        .into());
    }

    let delays: Vec<f64> = uvws.iter().map(|uvw| uvw.w / VEL_C).collect();
    for (name, delay) in names.iter().zip(delays.iter()) {
        trace!("{}: {delay} s", name.as_ref());
    }
    Ok(delays)
}

/// Get the delays \[seconds\] that steer beams away from `boresight` towards
/// each of `beams`. The result is `[beam][antenna]`.
///
/// For antenna `i`, the entry for a beam is `T_i - TP_i`, where `T_i` is its
/// delay towards the boresight and `TP_i` is its delay towards the beam, both
/// relative to the reference antenna (see [`compute_delays`]). A beam that
/// is the boresight has all-zero delays.
///
/// # Errors
///
/// As for [`compute_delays`], and [`InvalidInputError::NoBeams`] if `beams`
/// is empty.
pub fn compute_beam_delays<P, S>(
    projector: &P,
    epoch: Epoch,
    boresight: RADec,
    beams: &[RADec],
    names: &[S],
    positions: &[XyzGeocentric],
    reference_position: XyzGeocentric,
) -> Result<Array2<f64>, DelayError>
where
    P: Projector + ?Sized,
    S: AsRef<str>,
{
    if beams.is_empty() {
        return Err(InvalidInputError::NoBeams.into());
    }

    let boresight_delays = compute_delays(
        projector,
        epoch,
        boresight,
        names,
        positions,
        reference_position,
    )?;

    let mut beam_delays = Array2::zeros((beams.len(), positions.len()));
    for (i_beam, (&beam, mut row)) in beams
        .iter()
        .zip(beam_delays.outer_iter_mut())
        .enumerate()
    {
        debug!(
            "Beam {i_beam}: RA {}°, Dec {}°",
            beam.ra.to_degrees(),
            beam.dec.to_degrees()
        );
        let delays = compute_delays(projector, epoch, beam, names, positions, reference_position)?;
        row.iter_mut()
            .zip(boresight_delays.iter().zip(delays.iter()))
            .for_each(|(out, (t, tp))| *out = t - tp);
    }
    Ok(beam_delays)
}

fn same_position(a: &XyzGeocentric, b: &XyzGeocentric) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}
