// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the "phases-plot" subcommand.

use tempfile::TempDir;

use crate::*;

#[test]
#[cfg(feature = "plotting")]
fn test_phases_plot_writes_png() {
    let telinfo = ata_telinfo();
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("phases.png");

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "phases-plot",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--antennas", "1c", "1e", "2a", "5b",
            "--nchans", "128",
            "--output", &path_str(&output),
        ])
        .ok();
    assert!(cmd.is_ok(), "phases-plot failed: {}", cmd.err().unwrap());
    assert!(output.exists());
}

#[test]
#[cfg(not(feature = "plotting"))]
fn test_phases_plot_needs_plotting_feature() {
    let telinfo = ata_telinfo();
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("phases.png");

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "phases-plot",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--output", &path_str(&output),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("plotting"), "{stderr}");
    assert!(!output.exists());
}
