use std::fs;
use std::io::{self, Read};
use std::path::Path;

use phptidy_lib::NameMaps;

/// Read the input text plus a display path for diagnostics. `None` or `-`
/// reads stdin.
pub fn load_input(path: Option<&Path>) -> (String, Option<String>) {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("error: cannot read {}: {}", path.display(), e);
                std::process::exit(1);
            });
            (text, Some(path.display().to_string()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("error: cannot read stdin: {}", e);
                std::process::exit(1);
            });
            (buf, None)
        }
    }
}

/// Load the rename tables, or empty tables when no file was given.
pub fn load_maps(path: Option<&Path>) -> NameMaps {
    let Some(path) = path else {
        return NameMaps::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read {}: {}", path.display(), e);
        std::process::exit(1);
    });
    NameMaps::from_json(&text).unwrap_or_else(|e| {
        eprintln!("error: invalid map file {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

/// Write to the output file, or stdout when none was given. Never writes
/// back to the input path implicitly.
pub fn write_output(path: Option<&Path>, text: &str) {
    match path {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("error: cannot write {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => print!("{text}"),
    }
}
