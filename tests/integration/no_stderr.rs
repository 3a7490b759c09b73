// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use crate::*;

#[test]
fn test_delays_no_stderr() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "-vv",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_help_no_stderr() {
    for sub_command in ["delays", "phases-plot"] {
        let cmd = beamphase().args([sub_command, "--help"]).ok();
        assert!(cmd.is_ok(), "{sub_command} --help failed: {}", cmd.err().unwrap());
        let (stdout, stderr) = get_cmd_output(cmd);
        assert!(stdout.contains("--config-path"), "{stdout}");
        assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    }
}
