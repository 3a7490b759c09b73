// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Delays are tens of nanoseconds
while frequencies are GHz; single precision would lose the phase.
 */

pub use marlu::constants::VEL_C;
pub use std::f64::consts::{PI, TAU};

/// The default observing (RF centre) frequency \[Hz\].
pub const DEFAULT_OBS_FREQ_HZ: f64 = 6500.125e6;

/// The default bandwidth of the channelised band \[Hz\].
pub const DEFAULT_BANDWIDTH_HZ: f64 = 1.024e9;

/// The default number of channels across the band.
pub const DEFAULT_NUM_CHANNELS: usize = 2048;

/// Where the antenna positions live if nothing else is specified.
pub const DEFAULT_CONFIG_PATH: &str = "/opt/mnt/share/telinfo_ata.toml";

/// Allen Telescope Array longitude \[degrees\].
pub const ATA_LONG_DEG: f64 = -121.470733;

/// Allen Telescope Array latitude \[degrees\].
pub const ATA_LAT_DEG: f64 = 40.815987;

/// Allen Telescope Array altitude \[metres\].
pub const ATA_HEIGHT_M: f64 = 1020.86;
