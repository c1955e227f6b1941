use std::path::PathBuf;

use super::commands::build_cli;
use super::dispatch::{CheckParams, DecodeParams, FmtParams};

fn matches_for(argv: &[&str]) -> clap::ArgMatches {
    build_cli()
        .try_get_matches_from(argv)
        .expect("argv should parse")
}

#[test]
fn fmt_defaults() {
    let m = matches_for(&["phptidy", "fmt"]);
    let (_, sub) = m.subcommand().unwrap();
    let params = FmtParams::from_matches(sub);

    assert!(params.input.is_none());
    assert!(!params.no_cleanup);
    assert!(!params.tabs);
    assert_eq!(params.indent, 4);
}

#[test]
fn fmt_flags_round_trip() {
    let m = matches_for(&[
        "phptidy",
        "fmt",
        "index.php",
        "-o",
        "tidy.php",
        "--maps",
        "names.json",
        "--indent",
        "2",
        "--no-cleanup",
        "-v",
        "--color",
        "never",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    let params = FmtParams::from_matches(sub);

    assert_eq!(params.input, Some(PathBuf::from("index.php")));
    assert_eq!(params.output, Some(PathBuf::from("tidy.php")));
    assert_eq!(params.maps, Some(PathBuf::from("names.json")));
    assert_eq!(params.indent, 2);
    assert!(params.no_cleanup);
    assert!(params.verbose);

    let args: crate::commands::fmt::FmtArgs = params.into();
    assert_eq!(args.indent_unit, "  ");
    assert!(!args.cleanup);
    assert!(!args.color);
}

#[test]
fn fmt_tabs_conflict_with_indent() {
    let result = build_cli().try_get_matches_from(["phptidy", "fmt", "--tabs", "--indent", "2"]);
    assert!(result.is_err());
}

#[test]
fn tabs_select_a_tab_unit() {
    let m = matches_for(&["phptidy", "fmt", "--tabs"]);
    let (_, sub) = m.subcommand().unwrap();
    let args: crate::commands::fmt::FmtArgs = FmtParams::from_matches(sub).into();
    assert_eq!(args.indent_unit, "\t");
}

#[test]
fn check_takes_maps() {
    let m = matches_for(&["phptidy", "check", "index.php", "--maps", "names.json"]);
    let (_, sub) = m.subcommand().unwrap();
    let params = CheckParams::from_matches(sub);
    assert_eq!(params.input, Some(PathBuf::from("index.php")));
    assert_eq!(params.maps, Some(PathBuf::from("names.json")));
}

#[test]
fn decode_requires_input() {
    assert!(build_cli().try_get_matches_from(["phptidy", "decode"]).is_err());

    let m = matches_for(&["phptidy", "decode", "payload.php"]);
    let (_, sub) = m.subcommand().unwrap();
    let params = DecodeParams::from_matches(sub);
    assert_eq!(params.input, PathBuf::from("payload.php"));
}
