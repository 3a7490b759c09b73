// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-channel phase corrections ("phasors") from geometric delays.
//!
//! A pure time delay is a linear phase ramp across a channelised band. The
//! channel grid starts at baseband zero, so the RF offset of the band is
//! folded in separately with a single per-antenna [`fringe_rate`] term.


use log::debug;
use marlu::c64;
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::{constants::TAU, InvalidInputError};

fn check_grid(nchans: usize, bandwidth: f64) -> Result<(), InvalidInputError> {
    if nchans == 0 {
        return Err(InvalidInputError::ZeroChannels);
    }
    if !(bandwidth.is_finite() && bandwidth > 0.0) {
        return Err(InvalidInputError::BadBandwidth(bandwidth));
    }
    Ok(())
}

fn check_delay(delay: f64) -> Result<(), InvalidInputError> {
    if delay.is_finite() {
        Ok(())
    } else {
        Err(InvalidInputError::NonFiniteDelay(delay))
    }
}

/// The channel frequencies \[Hz\] relative to baseband zero:
/// `k * bandwidth / nchans` for `k` in `0..nchans`.
pub fn channel_freqs(nchans: usize, bandwidth: f64) -> Result<Vec<f64>, InvalidInputError> {
    check_grid(nchans, bandwidth)?;
    let chan_width = bandwidth / nchans as f64;
    Ok((0..nchans).map(|k| k as f64 * chan_width).collect())
}

/// The phasor `exp(-2πi·delay·f)` for every channel frequency `f` of the
/// grid described by `nchans` and `bandwidth`. A zero delay gives all ones.
pub fn make_phasors(
    delay: f64,
    nchans: usize,
    bandwidth: f64,
) -> Result<Vec<c64>, InvalidInputError> {
    check_delay(delay)?;
    let freqs = channel_freqs(nchans, bandwidth)?;
    Ok(freqs.iter().map(|f| c64::cis(-TAU * delay * f)).collect())
}

/// The fringe-rate term `exp(-2πi·delay·(centre_freq - bandwidth/2))`. This
/// is a single scalar for the whole band; it shifts the phase of every
/// channel uniformly.
pub fn fringe_rate(
    delay: f64,
    centre_freq: f64,
    bandwidth: f64,
) -> Result<c64, InvalidInputError> {
    check_delay(delay)?;
    if !centre_freq.is_finite() {
        return Err(InvalidInputError::BadCentreFreq(centre_freq));
    }
    if !(bandwidth.is_finite() && bandwidth > 0.0) {
        return Err(InvalidInputError::BadBandwidth(bandwidth));
    }
    Ok(fringe_rate_inner(delay, centre_freq, bandwidth))
}

fn fringe_rate_inner(delay: f64, centre_freq: f64, bandwidth: f64) -> c64 {
    c64::cis(-TAU * delay * (centre_freq - bandwidth / 2.0))
}

/// [`make_phasors`] multiplied by [`fringe_rate`].
pub fn corrected_phasors(
    delay: f64,
    nchans: usize,
    bandwidth: f64,
    centre_freq: f64,
) -> Result<Vec<c64>, InvalidInputError> {
    let fringe = fringe_rate(delay, centre_freq, bandwidth)?;
    let mut phasors = make_phasors(delay, nchans, bandwidth)?;
    phasors.iter_mut().for_each(|p| *p *= fringe);
    Ok(phasors)
}

/// Phasors for many antennas at once. The result has dimensions
/// `[num_delays][nchans]`. If `centre_freq` is `None`, the fringe-rate term
/// is not applied. Nothing is computed unless every input is valid.
pub fn phasor_matrix(
    delays: &[f64],
    nchans: usize,
    bandwidth: f64,
    centre_freq: Option<f64>,
) -> Result<Array2<c64>, InvalidInputError> {
    let freqs = channel_freqs(nchans, bandwidth)?;
    for &delay in delays {
        check_delay(delay)?;
    }
    if let Some(centre_freq) = centre_freq {
        if !centre_freq.is_finite() {
            return Err(InvalidInputError::BadCentreFreq(centre_freq));
        }
    }
    debug!(
        "Making phasors for {} antennas and {nchans} channels",
        delays.len()
    );

    let mut matrix = Array2::from_elem((delays.len(), nchans), c64::new(1.0, 0.0));
    matrix
        .outer_iter_mut()
        .into_par_iter()
        .zip(delays.par_iter())
        .for_each(|(mut row, &delay)| {
            let fringe = centre_freq
                .map(|centre_freq| fringe_rate_inner(delay, centre_freq, bandwidth))
                .unwrap_or(c64::new(1.0, 0.0));
            row.iter_mut()
                .zip(freqs.iter())
                .for_each(|(p, f)| *p = c64::cis(-TAU * delay * f) * fringe);
        });
    Ok(matrix)
}
