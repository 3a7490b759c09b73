// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the "delays" subcommand.

use indoc::formatdoc;
use tempfile::TempDir;

use crate::*;

#[test]
fn test_delays_for_all_antennas() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--ref-ant", "1c",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    let delays = parse_delays(&stdout);
    assert_eq!(delays.len(), ATA_ANTENNAS.len(), "{stdout}");
    for ((name, delay), (expected_name, _)) in delays.iter().zip(ATA_ANTENNAS) {
        assert_eq!(name, &expected_name.to_uppercase());
        // The ATA's antennas are all within a few hundred metres of each
        // other.
        assert!(delay.abs() < 1e-6, "{name} {delay}");
    }
    assert_eq!(delays[0].1, 0.0);
    assert!(delays[1..].iter().any(|(_, d)| *d != 0.0));
}

#[test]
fn test_delays_follow_requested_order() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--ref-ant", "1C",
            "--antennas", "2a", "1E", "1c",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    let delays = parse_delays(&stdout);
    let names: Vec<&str> = delays.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["2A", "1E", "1C"]);
    assert_eq!(delays[2].1, 0.0);
}

#[test]
fn test_changing_the_reference_shifts_delays() {
    let telinfo = ata_telinfo();
    let run = |ref_ant: &str| {
        #[rustfmt::skip]
        let cmd = beamphase()
            .args([
                "delays",
                "--config-path", &path_str(telinfo.path()),
                "--ra", W3OH_RA,
                "--dec", W3OH_DEC,
                "--time", TIME,
                "--antennas", "1c", "1e",
                "--ref-ant", ref_ant,
            ])
            .ok();
        assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
        let (stdout, _) = get_cmd_output(cmd);
        parse_delays(&stdout)
    };

    let ref_1c = run("1c");
    let ref_1e = run("1e");
    assert_eq!(ref_1c[0].1, 0.0);
    assert_eq!(ref_1e[1].1, 0.0);
    let diff = (ref_1c[1].1 + ref_1e[0].1).abs();
    assert!(diff < 1e-15, "{ref_1c:?} {ref_1e:?}");
}

#[test]
fn test_missing_direction_fails() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--time", TIME,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("both are required"), "{stderr}");
}

#[test]
fn test_unknown_antenna_fails() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--antennas", "1c", "9Z",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("9Z"), "{stderr}");
}

#[test]
fn test_bad_config_fails() {
    let telinfo = write_temp("[[antennas]]\nname = \"1c\"\nposition = [1.0, 2.0]\n", ".toml");

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("exactly 3"), "{stderr}");
}

#[test]
fn test_args_file() {
    let telinfo = ata_telinfo();
    let args_file = write_temp(
        &formatdoc! {r#"
            [phasing]
            config_path = "{}"
            antennas = ["1c", "1e", "1g"]
            ra = {W3OH_RA}
            dec = {W3OH_DEC}
            time = {TIME}.0
        "#, path_str(telinfo.path())},
        ".toml",
    );

    let cmd = beamphase()
        .args(["delays", &path_str(args_file.path())])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let delays = parse_delays(&stdout);
    assert_eq!(delays.len(), 3);
    assert_eq!(delays[0].0, "1C");
}

#[test]
fn test_dry_run_prints_no_delays() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run -- exiting now."), "{stdout}");
    assert!(!stdout.contains("Delays [s]:"), "{stdout}");
}

#[test]
fn test_save_toml() {
    let telinfo = ata_telinfo();
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
            "--nchans", "64",
            "--save-toml", &path_str(&saved),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    assert!(saved.exists());

    // The saved arguments reproduce the run.
    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("[phasing]"), "{contents}");
    assert!(contents.contains("nchans = 64"), "{contents}");
    let cmd = beamphase()
        .args(["delays", &path_str(&saved)])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(parse_delays(&stdout).len(), ATA_ANTENNAS.len());
}

#[test]
fn test_beam_delays() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--beam", W3OH_RA, W3OH_DEC,
            "--beam", "37.1", "61.6",
            "--time", TIME,
            "--antennas", "1c", "1e", "2a", "5b",
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    assert_eq!(parse_delays(&stdout).len(), 4, "{stdout}");
    let at_boresight = parse_beam_delays(&stdout, 0);
    assert_eq!(at_boresight.len(), 4, "{stdout}");
    for (name, delay) in &at_boresight {
        assert_eq!(*delay, 0.0, "{name}");
    }

    let offset = parse_beam_delays(&stdout, 1);
    let names: Vec<&str> = offset.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["1C", "1E", "2A", "5B"]);
    assert_eq!(offset[0].1, 0.0);
    assert!(offset[1..].iter().any(|(_, d)| *d != 0.0), "{stdout}");
    assert!(offset.iter().all(|(_, d)| d.abs() < 1e-7), "{stdout}");
}

#[test]
fn test_bad_beam() {
    let telinfo = ata_telinfo();

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--beam", "37.1", "95.0",
            "--time", TIME,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Beam direction"), "{stderr}");
}

#[test]
fn test_sexagesimal_array_position() {
    let mut contents =
        String::from("latitude = \"40:48:57.55\"\nlongitude = \"-121:28:14.64\"\naltitude = 1020.86\n");
    for (name, [x, y, z]) in &ATA_ANTENNAS[..3] {
        contents.push_str(&format!(
            "\n[[antennas]]\nname = \"{name}\"\nposition = [{x:?}, {y:?}, {z:?}]\n"
        ));
    }
    let telinfo = write_temp(&contents, ".toml");

    #[rustfmt::skip]
    let cmd = beamphase()
        .args([
            "delays",
            "--config-path", &path_str(telinfo.path()),
            "--ra", W3OH_RA,
            "--dec", W3OH_DEC,
            "--time", TIME,
        ])
        .ok();
    assert!(cmd.is_ok(), "delays failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(parse_delays(&stdout).len(), 3, "{stdout}");
}
