//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("phptidy")
        .about("Format and deobfuscate PHP embedded in HTML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(fmt_command())
        .subcommand(check_command())
        .subcommand(decode_command())
}

/// Reformat a file.
pub fn fmt_command() -> Command {
    Command::new("fmt")
        .about("Reformat a PHP file")
        .override_usage(
            "\
  phptidy fmt [FILE]
  phptidy fmt [FILE] -o <OUT>
  phptidy fmt [FILE] --maps names.json",
        )
        .after_help(
            r#"EXAMPLES:
  phptidy fmt index.php                  # formatted source on stdout
  phptidy fmt index.php -o tidy.php      # write to a new file
  phptidy fmt index.php --tabs           # indent with tabs
  phptidy fmt index.php --maps names.json -v
  cat index.php | phptidy fmt"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(maps_arg())
        .arg(no_cleanup_arg())
        .arg(indent_arg())
        .arg(tabs_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Validate a file without rewriting it.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a PHP file and report advisories")
        .override_usage(
            "\
  phptidy check [FILE]
  phptidy check [FILE] --maps names.json",
        )
        .after_help(
            r#"EXAMPLES:
  phptidy check index.php                # exit 1 on parse errors
  phptidy check index.php --maps names.json"#,
        )
        .arg(input_arg())
        .arg(maps_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Recover and format an obfuscated payload.
pub fn decode_command() -> Command {
    Command::new("decode")
        .about("Decode an obfuscated payload, then format it")
        .override_usage(
            "\
  phptidy decode <FILE>
  phptidy decode <FILE> -o <OUT> --maps names.json",
        )
        .after_help(
            r#"EXAMPLES:
  phptidy decode obfuscated.php
  phptidy decode obfuscated.php -o recovered.php --maps names.json"#,
        )
        .arg(input_arg().required(true))
        .arg(output_arg())
        .arg(maps_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}
