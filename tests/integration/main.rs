// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod delays;
mod no_stderr;
mod phases_plot;

use std::{io::Write, path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};
use tempfile::{Builder, NamedTempFile};

/// The ATA antennas that were used when phasing up on W3OH.
const ATA_ANTENNAS: [(&str, [f64; 3]); 20] = [
    ("1c", [-2524041.5388905862, -4123587.965024342, 4147646.4222955606]),
    ("1e", [-2524068.187873109, -4123558.735413135, 4147656.21282186]),
    ("1g", [-2524087.2078100787, -4123532.397416349, 4147670.9866770394]),
    ("1h", [-2524103.384010733, -4123511.111598937, 4147682.4133068994]),
    ("1k", [-2524056.730228759, -4123515.287949227, 4147706.4850287656]),
    ("2a", [-2523986.279601761, -4123497.427940991, 4147766.732988923]),
    ("2b", [-2523970.301363642, -4123515.238502669, 4147758.790023165]),
    ("2c", [-2523983.5419911123, -4123528.1422073604, 4147737.872218138]),
    ("2e", [-2523941.5221860334, -4123568.125040547, 4147723.8292249846]),
    ("2h", [-2524074.096220788, -4123468.5182652213, 4147742.0422435375]),
    ("2j", [-2524058.6409591637, -4123466.5112451194, 4147753.4513993543]),
    ("2l", [-2524026.989692545, -4123480.9405167866, 4147758.2356800516]),
    ("2k", [-2524048.5254066754, -4123468.3463909747, 4147757.835369889]),
    ("2m", [-2524000.5641107005, -4123498.2984570004, 4147756.815976133]),
    ("3d", [-2523945.086670364, -4123480.3638816103, 4147808.127865142]),
    ("3l", [-2523950.6822576034, -4123444.7023326857, 4147839.7474427638]),
    ("4e", [-2523880.869769226, -4123514.3375464156, 4147813.413426994]),
    ("4g", [-2523930.3747946257, -4123454.3080821196, 4147842.6449955846]),
    ("4j", [-2523898.1150373477, -4123456.314794732, 4147860.3045849088]),
    ("5b", [-2523824.598229116, -4123527.93080514, 4147833.98936114]),
];

/// W3OH [degrees].
const W3OH_RA: &str = "36.766125";
const W3OH_DEC: &str = "61.8735";
/// 2022-04-07T21:21:13 UTC [Unix seconds].
const TIME: &str = "1649366473";

fn beamphase() -> Command {
    Command::cargo_bin("beamphase").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a telinfo toml with the ATA's position and all of its antennas.
fn ata_telinfo() -> NamedTempFile {
    let mut contents =
        String::from("latitude = 40.815987\nlongitude = -121.470733\naltitude = 1020.86\n");
    for (name, [x, y, z]) in ATA_ANTENNAS {
        contents.push_str(&format!(
            "\n[[antennas]]\nname = \"{name}\"\nposition = [{x:?}, {y:?}, {z:?}]\n"
        ));
    }
    write_temp(&contents, ".toml")
}

fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
    let mut f = Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn path_str(p: &Path) -> String {
    p.display().to_string()
}

/// Pull out the antenna names and delays printed after "Delays [s]:".
fn parse_delays(stdout: &str) -> Vec<(String, f64)> {
    parse_section(stdout, |l| l == "Delays [s]:")
}

/// As [`parse_delays`], but for the steering delays of a beam.
fn parse_beam_delays(stdout: &str, i_beam: usize) -> Vec<(String, f64)> {
    let prefix = format!("Beam {i_beam} (");
    parse_section(stdout, |l| l.starts_with(&prefix))
}

fn parse_section<F: Fn(&str) -> bool>(stdout: &str, is_header: F) -> Vec<(String, f64)> {
    stdout
        .lines()
        .skip_while(|l| !is_header(l))
        .skip(1)
        .map_while(|l| {
            let mut split = l.split(' ');
            match (split.next(), split.next(), split.next()) {
                (Some(name), Some(delay), None) => {
                    delay.parse::<f64>().ok().map(|d| (name.to_string(), d))
                }
                _ => None,
            }
        })
        .collect()
}
