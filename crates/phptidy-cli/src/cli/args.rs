//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so flags keep the same spelling and help text everywhere they appear.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input file (positional; stdin when omitted or "-").
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Input file (stdin when omitted)")
}

/// Write output to file instead of stdout (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file instead of stdout")
}

/// Identifier rename tables (--maps).
pub fn maps_arg() -> Arg {
    Arg::new("maps")
        .long("maps")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON file with function/variable rename tables")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Report identifier inventories after formatting (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Print collected variable and word inventories to stderr")
}

/// Disable rewriting; collect advisories only (--no-cleanup).
pub fn no_cleanup_arg() -> Arg {
    Arg::new("no_cleanup")
        .long("no-cleanup")
        .action(ArgAction::SetTrue)
        .help("Reproduce the input instead of rewriting it")
}

/// Spaces per indent level (--indent).
pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .value_name("N")
        .default_value("4")
        .value_parser(value_parser!(usize))
        .help("Spaces per indentation level")
}

/// Indent with tabs (--tabs).
pub fn tabs_arg() -> Arg {
    Arg::new("tabs")
        .long("tabs")
        .action(ArgAction::SetTrue)
        .conflicts_with("indent")
        .help("Indent with tabs instead of spaces")
}
