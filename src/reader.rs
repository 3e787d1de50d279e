//! Source acquisition: file contents into an in-memory program.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

/// Read the program at `path` into a single string, line by line, with
/// newline characters stripped.
pub fn read_program(path: &Path) -> Result<String, Error> {
    let file = File::open(path).map_err(|source| Error::FileRead { source })?;

    let mut raw = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| Error::FileRead { source })?;
        raw.push_str(&line);
    }

    Ok(raw)
}
