// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print the geometric delay of each antenna, and the delays that steer any
//! extra beams away from the boresight.


use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info, trace};
use marlu::RADec;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, PhasingArgs, ARG_FILE_HELP};
use crate::BeamphaseError;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DelaysArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "phasing")]
    #[serde(default)]
    pub(super) phasing_args: PhasingArgs,
}

impl DelaysArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<DelaysArgs, BeamphaseError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let DelaysArgs {
                args_file: _,
                phasing_args,
            } = unpack_arg_file!(arg_file);

            Ok(DelaysArgs {
                args_file: None,
                phasing_args: cli_args.phasing_args.merge(phasing_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), BeamphaseError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.phasing_args.parse()?;
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let delays = params.delays()?;
        let beam_delays = if params.beams.is_empty() {
            None
        } else {
            Some(params.beam_delays()?)
        };

        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_delays(&mut out, params.antenna_names.as_slice(), &delays)?;
        if let Some(beam_delays) = beam_delays {
            write_beam_delays(
                &mut out,
                params.antenna_names.as_slice(),
                &params.beams,
                beam_delays.view(),
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Write a "Delays [s]:" header, then one line per antenna of its name and
/// delay.
fn write_delays<W: Write>(out: &mut W, names: &[String], delays: &[f64]) -> std::io::Result<()> {
    writeln!(out, "Delays [s]:")?;
    for (name, delay) in names.iter().zip(delays) {
        writeln!(out, "{name} {delay}")?;
    }
    Ok(())
}

/// For each beam, write a header with its direction, then one line per antenna
/// of its name and the delay relative to the boresight.
fn write_beam_delays<W: Write>(
    out: &mut W,
    names: &[String],
    beams: &[RADec],
    beam_delays: ArrayView2<f64>,
) -> std::io::Result<()> {
    for (i_beam, (beam, delays)) in beams.iter().zip(beam_delays.outer_iter()).enumerate() {
        writeln!(
            out,
            "Beam {i_beam} (RA {:.6}°, Dec {:.6}°) delays relative to boresight [s]:",
            beam.ra.to_degrees(),
            beam.dec.to_degrees()
        )?;
        for (name, delay) in names.iter().zip(delays.iter()) {
            writeln!(out, "{name} {delay}")?;
        }
    }
    Ok(())
}
