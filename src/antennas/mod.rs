// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Antenna positions.
//!
//! Positions are read from a "telinfo" document, which is either toml or
//! json. It looks like this:
//!
//! ```toml
//! latitude = 40.815987
//! longitude = -121.470733
//! altitude = 1020.86
//!
//! [[antennas]]
//! name = "1c"
//! position = [-2524041.5388905862, -4123587.965024342, 4147646.4222955606]
//!
//! [[antennas]]
//! name = "1e"
//! position = [-2524068.187873109, -4123558.735413135, 4147656.21282186]
//! ```
//!
//! Positions are geocentric (ITRF) [metres]. The array position keys are
//! optional, but if one is given, all must be. `latitude` and `longitude` may
//! also be sexagesimal strings, e.g. `"40:49:02.75"`, `"-121 28 14.64"` or
//! `"-121d28m14.64s"`. Names are uppercased, so all
//! lookups are case insensitive.

mod error;

pub use error::{ConfigError, LookupError};

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace};
use marlu::{
    sexagesimal::{sexagesimal_dms_string_to_degrees, sexagesimal_dms_to_degrees},
    LatLngHeight, XyzGeocentric,
};
use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

lazy_static::lazy_static! {
    pub(crate) static ref TELINFO_FILE_TYPES_COMMA_SEPARATED: String = TelinfoFileType::iter().join(", ");
}

#[derive(Debug, Display, EnumIter, EnumString)]
enum TelinfoFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// The raw document. Everything is optional here so that missing things can
/// be reported by name.
#[derive(Debug, Deserialize)]
struct Telinfo {
    antennas: Option<Vec<TelinfoAntenna>>,
    latitude: Option<Angle>,
    longitude: Option<Angle>,
    altitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TelinfoAntenna {
    name: Option<String>,
    position: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Angle {
    Degrees(f64),
    Sexagesimal(String),
}

impl Angle {
    fn to_degrees(&self, key: &'static str) -> Result<f64, ConfigError> {
        match self {
            Angle::Degrees(d) => Ok(*d),
            Angle::Sexagesimal(s) => parse_sexagesimal(s).map_err(|err| ConfigError::BadAngle {
                key,
                value: s.clone(),
                err,
            }),
        }
    }
}

/// Parse "DD:MM:SS.S", "DD MM SS.S" or "DDdMMmSS.Ss" into degrees. The sign of
/// the degrees field applies to the whole angle, so "-0:30:00" is -0.5.
fn parse_sexagesimal(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.contains('d') {
        return sexagesimal_dms_string_to_degrees(s).map_err(|e| e.to_string());
    }

    let fields: Vec<&str> = s
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    let (d, m, sec) = match fields.as_slice() {
        [d, m, sec] => (*d, *m, *sec),
        _ => {
            return Err(format!(
                "expected 3 fields separated by ':' or spaces, got {}",
                fields.len()
            ))
        }
    };
    let parse = |f: &str| -> Result<f64, String> {
        f.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{f}' is not a number"))
    };
    let (negative, d_abs) = (d.starts_with('-'), parse(d)?.abs());
    let (m, sec) = (parse(m)?, parse(sec)?);
    if !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&sec) {
        return Err("minutes and seconds must be within 0 and 60".to_string());
    }
    let degrees = sexagesimal_dms_to_degrees(d_abs, m, sec);
    Ok(if negative { -degrees } else { degrees })
}

/// An antenna name and its geocentric position.
#[derive(Debug, Clone, Copy)]
pub struct AntennaPosition<'a> {
    /// The (uppercased) antenna name.
    pub name: &'a str,

    /// Geocentric position \[metres\].
    pub xyz: XyzGeocentric,
}

/// All known antennas, keyed by uppercased name. The order in which antennas
/// were loaded is preserved.
#[derive(Debug, Clone)]
pub struct AntennaRegistry {
    antennas: IndexMap<String, XyzGeocentric>,

    /// The array position, if the configuration specified one.
    array_position: Option<LatLngHeight>,
}

impl AntennaRegistry {
    /// Build a registry from name/position pairs.
    ///
    /// # Errors
    ///
    /// Fails if no antennas are given, if a name repeats (ignoring case) or if
    /// a position isn't finite.
    pub fn new<I, S>(antennas: I) -> Result<AntennaRegistry, ConfigError>
    where
        I: IntoIterator<Item = (S, XyzGeocentric)>,
        S: AsRef<str>,
    {
        let mut map = IndexMap::new();
        for (name, xyz) in antennas {
            let name = name.as_ref().to_uppercase();
            if ![xyz.x, xyz.y, xyz.z].iter().all(|f| f.is_finite()) {
                return Err(ConfigError::NonFinitePosition { name });
            }
            if map.contains_key(&name) {
                return Err(ConfigError::DuplicateName { name });
            }
            map.insert(name, xyz);
        }
        if map.is_empty() {
            return Err(ConfigError::NoAntennas);
        }

        Ok(AntennaRegistry {
            antennas: map,
            array_position: None,
        })
    }

    /// Read a toml or json telinfo file. The type is determined by the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Any problem with reading or decoding the file, or with its contents,
    /// gives a [`ConfigError`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AntennaRegistry, ConfigError> {
        let path = path.as_ref();
        debug!("Attempting to read antenna configuration {}", path.display());

        let file_type = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| TelinfoFileType::from_str(&e).ok())
            .ok_or_else(|| ConfigError::UnsupportedExt(path.to_path_buf()))?;

        let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            err,
        })?;

        match file_type {
            TelinfoFileType::Toml => {
                debug!("Parsing toml file...");
                AntennaRegistry::from_toml_str(&contents)
            }
            TelinfoFileType::Json => {
                debug!("Parsing json file...");
                AntennaRegistry::from_json_str(&contents)
            }
        }
    }

    /// Decode a toml telinfo document.
    ///
    /// # Errors
    ///
    /// See [`AntennaRegistry::load`].
    pub fn from_toml_str(s: &str) -> Result<AntennaRegistry, ConfigError> {
        let telinfo: Telinfo = toml::from_str(s)?;
        AntennaRegistry::from_telinfo(telinfo)
    }

    /// Decode a json telinfo document.
    ///
    /// # Errors
    ///
    /// See [`AntennaRegistry::load`].
    pub fn from_json_str(s: &str) -> Result<AntennaRegistry, ConfigError> {
        let telinfo: Telinfo = serde_json::from_str(s)?;
        AntennaRegistry::from_telinfo(telinfo)
    }

    fn from_telinfo(telinfo: Telinfo) -> Result<AntennaRegistry, ConfigError> {
        let Telinfo {
            antennas,
            latitude,
            longitude,
            altitude,
        } = telinfo;

        let entries = antennas.ok_or(ConfigError::NoAntennasKey)?;
        let mut named = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let name = entry.name.ok_or(ConfigError::MissingName { index })?;
            let position = entry
                .position
                .ok_or_else(|| ConfigError::MissingPosition { name: name.clone() })?;
            let xyz = match position.as_slice() {
                &[x, y, z] => XyzGeocentric { x, y, z },
                p => {
                    return Err(ConfigError::BadPositionLength {
                        len: p.len(),
                        name,
                    })
                }
            };
            trace!("{name}: {xyz:?}");
            named.push((name, xyz));
        }

        let array_position = match (latitude, longitude, altitude) {
            (Some(lat), Some(long), Some(height_metres)) => Some(LatLngHeight {
                longitude_rad: long.to_degrees("longitude")?.to_radians(),
                latitude_rad: lat.to_degrees("latitude")?.to_radians(),
                height_metres,
            }),
            (None, None, None) => None,
            _ => return Err(ConfigError::PartialArrayPosition),
        };

        let mut registry = AntennaRegistry::new(named)?;
        registry.array_position = array_position;
        debug!("Read positions for {} antennas", registry.len());
        Ok(registry)
    }

    /// Get the positions of the requested antennas, in the requested order.
    ///
    /// # Errors
    ///
    /// Fails on the first name that isn't in the registry.
    pub fn subset<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<AntennaPosition<'_>>, LookupError> {
        names
            .iter()
            .map(|name| {
                self.antennas
                    .get_key_value(&name.as_ref().to_uppercase())
                    .map(|(name, &xyz)| AntennaPosition { name, xyz })
                    .ok_or_else(|| LookupError::AntennaNotFound {
                        name: name.as_ref().to_string(),
                    })
            })
            .collect()
    }

    /// Get the position of a single antenna.
    pub fn get(&self, name: &str) -> Option<XyzGeocentric> {
        self.antennas.get(&name.to_uppercase()).copied()
    }

    /// All antenna names, in the order they were loaded.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.antennas.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }

    /// The array position given by the configuration, if any.
    pub fn array_position(&self) -> Option<LatLngHeight> {
        self.array_position
    }
}

/// Find the index of the reference antenna in a list of antenna names. The
/// comparison ignores case.
///
/// # Errors
///
/// Fails if the reference antenna isn't in `names`.
pub fn index_of<S: AsRef<str>>(names: &[S], reference: &str) -> Result<usize, LookupError> {
    let reference_upper = reference.to_uppercase();
    names
        .iter()
        .position(|name| name.as_ref().to_uppercase() == reference_upper)
        .ok_or_else(|| LookupError::ReferenceNotInSubset {
            reference: reference.to_string(),
        })
}
