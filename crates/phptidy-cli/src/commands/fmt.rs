use std::path::PathBuf;

use phptidy_lib::diagnostics::render_fatal;
use phptidy_lib::{FormatOptions, Formatted, Formatter};

use crate::util::{load_input, load_maps, write_output};

pub struct FmtArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub cleanup: bool,
    pub indent_unit: String,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: FmtArgs) {
    let (source, path) = load_input(args.input.as_deref());
    let maps = load_maps(args.maps.as_deref());

    let options = FormatOptions::default()
        .with_cleanup(args.cleanup)
        .with_indent_unit(args.indent_unit.clone());

    let result = Formatter::new(&source)
        .options(options)
        .variable_resolver(&maps.variables)
        .function_resolver(&maps.functions)
        .run();

    let formatted = match result {
        Ok(formatted) => formatted,
        Err(e) => {
            eprintln!("{}", render_fatal(&source, path.as_deref(), &e, args.color));
            std::process::exit(1);
        }
    };

    report(&formatted, &source, path.as_deref(), args.color, args.verbose);
    write_output(args.output.as_deref(), &formatted.text);
}

/// Advisories and (with `-v`) identifier inventories, all on stderr so the
/// formatted text can be piped.
pub(super) fn report(
    formatted: &Formatted,
    source: &str,
    path: Option<&str>,
    color: bool,
    verbose: bool,
) {
    if !formatted.diagnostics.is_empty() {
        let mut printer = formatted.diagnostics.printer().source(source).colored(color);
        if let Some(path) = path {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
    }

    if verbose {
        eprintln!("variables: {}", formatted.sorted_variables().join(", "));
        eprintln!("words: {}", formatted.sorted_words().join(", "));
        if !formatted.unresolved.is_empty() {
            eprintln!("unresolved: {}", formatted.sorted_unresolved().join(", "));
        }
    }
}
