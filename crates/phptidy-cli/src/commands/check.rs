use std::path::PathBuf;

use phptidy_lib::Formatter;
use phptidy_lib::diagnostics::render_fatal;

use crate::util::{load_input, load_maps};

pub struct CheckArgs {
    pub input: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let (source, path) = load_input(args.input.as_deref());
    let maps = load_maps(args.maps.as_deref());

    let result = Formatter::new(&source)
        .variable_resolver(&maps.variables)
        .function_resolver(&maps.functions)
        .run();

    match result {
        Ok(formatted) => {
            // Silent on a clean run, like `cargo check`.
            super::fmt::report(&formatted, &source, path.as_deref(), args.color, args.verbose);
        }
        Err(e) => {
            eprintln!("{}", render_fatal(&source, path.as_deref(), &e, args.color));
            std::process::exit(1);
        }
    }
}
