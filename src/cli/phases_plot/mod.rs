// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot the fringe-corrected phase of each channel of each antenna.

mod error;

pub(crate) use error::PhasesPlotError;

use std::path::PathBuf;

use clap::Parser;
use log::debug;
#[cfg(feature = "plotting")]
use log::{info, trace};
use serde::{Deserialize, Serialize};

#[cfg(feature = "plotting")]
use super::common::display_warnings;
use super::common::{PhasingArgs, ARG_FILE_HELP};
use crate::BeamphaseError;

const DEFAULT_OUTPUT: &str = "phases.png";

lazy_static::lazy_static! {
    static ref OUTPUT_HELP: String =
        format!("The PNG file to write the plot to. Default: {DEFAULT_OUTPUT}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PhasesPlotArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "phasing")]
    #[serde(default)]
    pub(super) phasing_args: PhasingArgs,

    #[clap(
        short,
        long,
        help = OUTPUT_HELP.as_str(),
        help_heading = "OUTPUT FILES",
        parse(from_os_str)
    )]
    pub(super) output: Option<PathBuf>,

    /// The width of the plot [pixels]. Default: 1600
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) width: Option<u32>,

    /// The height of the plot [pixels]. Default: 900
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) height: Option<u32>,
}

impl PhasesPlotArgs {
    /// Consolidate the command-line arguments with those in the argument file,
    /// preferring CLI parameters.
    pub(super) fn merge(self) -> Result<PhasesPlotArgs, BeamphaseError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PhasesPlotArgs {
                args_file: _,
                phasing_args,
                output,
                width,
                height,
            } = unpack_arg_file!(arg_file);

            Ok(PhasesPlotArgs {
                args_file: None,
                phasing_args: cli_args.phasing_args.merge(phasing_args),
                output: cli_args.output.or(output),
                width: cli_args.width.or(width),
                height: cli_args.height.or(height),
            })
        } else {
            Ok(cli_args)
        }
    }

    #[cfg(not(feature = "plotting"))]
    pub(super) fn run(self, _dry_run: bool) -> Result<(), BeamphaseError> {
        // Plotting is an optional feature. If it isn't available, tell the
        // user that they'll need to compile beamphase with it.
        Err(BeamphaseError::from(PhasesPlotError::NoPlottingFeature))
    }

    #[cfg(feature = "plotting")]
    pub(super) fn run(self, dry_run: bool) -> Result<(), BeamphaseError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);

        let PhasesPlotArgs {
            args_file: _,
            phasing_args,
            output,
            width,
            height,
        } = self;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let is_png = output
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if !is_png {
            return Err(PhasesPlotError::NotPng(output).into());
        }
        let params = phasing_args.parse()?;
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let delays = params.delays()?;
        let phasors = params.phasors(&delays)?;
        plotting::plot_phases(
            &output,
            params.antenna_names.as_slice(),
            phasors.view(),
            (
                width.unwrap_or(plotting::X_PIXELS),
                height.unwrap_or(plotting::Y_PIXELS),
            ),
        )?;
        info!("Wrote {}", output.display());
        Ok(())
    }
}

#[cfg(feature = "plotting")]
mod plotting {
    use std::{f64::consts::PI, path::Path};

    use marlu::c64;
    use ndarray::prelude::*;
    use plotters::prelude::*;
    use thiserror::Error;

    use super::PhasesPlotError;

    /// The default number of X pixels on the plot.
    pub(super) const X_PIXELS: u32 = 1600;
    /// The default number of Y pixels on the plot.
    pub(super) const Y_PIXELS: u32 = 900;

    /// Plot the phase of every channel of every antenna's phasors on a single
    /// chart. `phasors` has one row per antenna.
    pub(super) fn plot_phases(
        output: &Path,
        antenna_names: &[String],
        phasors: ArrayView2<c64>,
        (width, height): (u32, u32),
    ) -> Result<(), PhasesPlotError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let num_chans = phasors.len_of(Axis(1));
        let root_area = BitMapBackend::new(output, (width, height)).into_drawing_area();
        root_area
            .fill(&WHITE)
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;

        let mut cc = ChartBuilder::on(&root_area)
            .caption("Fringe-corrected phasors", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0..num_chans.max(1), -PI..PI)
            .map_err(|e| DrawError::Phases(e.to_string()))?;

        cc.configure_mesh()
            .x_desc("Frequency channel number")
            .y_desc("Phase [rad]")
            .light_line_style(WHITE)
            .draw()
            .map_err(|e| DrawError::Phases(e.to_string()))?;

        for (i_ant, (name, ant_phasors)) in antenna_names
            .iter()
            .zip(phasors.outer_iter())
            .enumerate()
        {
            let colour = Palette99::pick(i_ant).to_rgba();
            cc.draw_series(PointSeries::of_element(
                ant_phasors
                    .iter()
                    .enumerate()
                    .map(|(i_chan, p)| (i_chan, p.arg())),
                1,
                colour.filled(),
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(|e| DrawError::Phases(e.to_string()))?
            .label(name.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, colour.filled()));
        }

        cc.configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| DrawError::Phases(e.to_string()))?;

        root_area
            .present()
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        Ok(())
    }

    #[derive(Error, Debug)]
    pub(crate) enum DrawError {
        #[error("While plotting phases: {0}")]
        Phases(String),

        #[error("Error from the plotters library: {0}")]
        Plotters(Box<dyn std::error::Error>),
    }
}
