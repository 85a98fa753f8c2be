//! Nucleotide sequence stores.
//!
//! The short-sequence store is a single `list.html` of `<dt>name</dt>sequence`
//! lines; a name without a line is an error. The long-sequence store holds one
//! pseudo-document per species whose content sits between a `<body>` line and
//! a `</body>` line; a species without a document simply has no long
//! sequence.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The file name of the short-sequence store inside the sequences directory.
pub const SHORT_SEQUENCE_FILE: &str = "list.html";

const DT_OPEN: &str = "<dt>";
const DT_CLOSE: &str = "</dt>";
const BODY_OPEN: &str = "<body>";
const BODY_CLOSE: &str = "</body>";

/// Short sequences keyed by name.
#[derive(Debug, Default)]
pub struct ShortSequences {
    sequences: HashMap<String, String>,
}

impl ShortSequences {
    /// Loads `<dir>/list.html`. A missing file yields an empty store.
    pub fn load(dir: &Path) -> Result<ShortSequences> {
        let path = dir.join(SHORT_SEQUENCE_FILE);
        match File::open(&path) {
            Ok(file) => Self::from_reader(BufReader::new(file)).map_err(|err| Error::io(path, err)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("No short sequences at `{}`", path.display());
                Ok(ShortSequences::default())
            }
            Err(err) => Err(Error::io(path, err)),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<ShortSequences> {
        let mut sequences = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(rest) = line.strip_prefix(DT_OPEN) {
                if let Some(close) = rest.find(DT_CLOSE) {
                    let name = &rest[..close];
                    let sequence = rest[close + DT_CLOSE.len()..].trim_end();
                    sequences
                        .entry(name.to_owned())
                        .or_insert_with(|| sequence.to_owned());
                }
            }
        }
        Ok(ShortSequences { sequences })
    }

    /// Returns the sequence recorded under exactly `name`.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.sequences
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::not_found("short sequence", name))
    }
}

/// Returns the path of the long-sequence document for `code`.
pub fn long_sequence_path(dir: &Path, code: &str) -> PathBuf {
    dir.join(format!("{}.html", code))
}

/// Loads the long sequence for `code` from `dir`. Returns `Ok(None)` when the
/// species has no long-sequence document.
pub fn long_sequence(dir: &Path, code: &str) -> Result<Option<String>> {
    let path = long_sequence_path(dir, code);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("No long sequence for `{}`", code);
            return Ok(None);
        }
        Err(err) => return Err(Error::io(path, err)),
    };
    extract_body(BufReader::new(file), &path).map(Some)
}

/// Returns the lines between the `<body>` and `</body>` sentinel lines of
/// `reader`, verbatim and joined by `\n`. Text after `<body>` on the opening
/// line and before `</body>` on the closing line belongs to the content; the
/// closing line is the first one containing `</body>` anywhere.
pub fn extract_body<R: BufRead>(reader: R, path: &Path) -> Result<String> {
    let mut body: Option<Vec<String>> = None;
    for line in reader.lines() {
        let line = line.map_err(|err| Error::io(path, err))?;
        match body.as_mut() {
            None => {
                if let Some(rest) = line.trim_start().strip_prefix(BODY_OPEN) {
                    if let Some(close) = rest.find(BODY_CLOSE) {
                        return Ok(rest[..close].to_owned());
                    }
                    let mut lines = Vec::new();
                    if !rest.trim().is_empty() {
                        lines.push(rest.to_owned());
                    }
                    body = Some(lines);
                }
            }
            Some(lines) => {
                if let Some(close) = line.find(BODY_CLOSE) {
                    let before = &line[..close];
                    if !before.trim().is_empty() {
                        lines.push(before.to_owned());
                    }
                    return Ok(lines.join("\n"));
                }
                lines.push(line);
            }
        }
    }
    Err(Error::MalformedContent {
        path: path.to_owned(),
        reason: match body {
            Some(_) => "`<body>` is never closed",
            None => "no `<body>` section",
        },
    })
}
