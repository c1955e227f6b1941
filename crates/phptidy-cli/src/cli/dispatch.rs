//! Dispatch logic: extract params from ArgMatches and convert to command
//! args.
//!
//! `*Params` structs mirror the command `*Args` but are populated straight
//! from clap; `Into<*Args>` impls bridge dispatch to the command handlers,
//! resolving presentation concerns (color detection, indent unit) on the
//! way.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::decode::DecodeArgs;
use crate::commands::fmt::FmtArgs;

pub struct FmtParams {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub no_cleanup: bool,
    pub indent: usize,
    pub tabs: bool,
    pub verbose: bool,
    pub color: ColorChoice,
}

impl FmtParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            maps: m.get_one::<PathBuf>("maps").cloned(),
            no_cleanup: m.get_flag("no_cleanup"),
            indent: *m.get_one::<usize>("indent").unwrap_or(&4),
            tabs: m.get_flag("tabs"),
            verbose: m.get_flag("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<FmtParams> for FmtArgs {
    fn from(p: FmtParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            maps: p.maps,
            cleanup: !p.no_cleanup,
            indent_unit: indent_unit(p.tabs, p.indent),
            verbose: p.verbose,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub input: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub verbose: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned(),
            maps: m.get_one::<PathBuf>("maps").cloned(),
            verbose: m.get_flag("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input,
            maps: p.maps,
            verbose: p.verbose,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DecodeParams {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub verbose: bool,
    pub color: ColorChoice,
}

impl DecodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m
                .get_one::<PathBuf>("input")
                .cloned()
                .expect("input is a required arg"),
            output: m.get_one::<PathBuf>("output").cloned(),
            maps: m.get_one::<PathBuf>("maps").cloned(),
            verbose: m.get_flag("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<DecodeParams> for DecodeArgs {
    fn from(p: DecodeParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            maps: p.maps,
            verbose: p.verbose,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn indent_unit(tabs: bool, indent: usize) -> String {
    if tabs {
        "\t".to_string()
    } else {
        " ".repeat(indent)
    }
}
