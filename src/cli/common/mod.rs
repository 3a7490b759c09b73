// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both the `delays` and
//! `phases-plot` subcommands need antennas, a direction and a time, so the
//! same phasing arguments are shared between them.

mod phasing;
mod printers;

pub(super) use phasing::{PhasingArgs, PhasingArgsError};
pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{
    ATA_HEIGHT_M, ATA_LAT_DEG, ATA_LONG_DEG, DEFAULT_BANDWIDTH_HZ, DEFAULT_CONFIG_PATH,
    DEFAULT_NUM_CHANNELS, DEFAULT_OBS_FREQ_HZ,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref CONFIG_PATH_HELP: String =
        format!("Path to the antenna position configuration (toml or json). Default: {DEFAULT_CONFIG_PATH}");

    pub(super) static ref ARRAY_POSITION_HELP: String =
        format!("The Earth longitude, latitude, and height of the instrumental array [degrees, degrees, meters]. If not given, the antenna configuration's position is used. Default (ATA): ({ATA_LONG_DEG}°, {ATA_LAT_DEG}°, {ATA_HEIGHT_M}m)");

    pub(super) static ref OBS_FREQ_HELP: String =
        format!("The RF centre frequency of the observation [Hz]. Default: {DEFAULT_OBS_FREQ_HZ}");

    pub(super) static ref BANDWIDTH_HELP: String =
        format!("The bandwidth of the channelised band [Hz]. Default: {DEFAULT_BANDWIDTH_HZ}");

    pub(super) static ref NUM_CHANNELS_HELP: String =
        format!("The number of channels across the band. Default: {DEFAULT_NUM_CHANNELS}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(BeamphaseError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(BeamphaseError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(BeamphaseError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}
