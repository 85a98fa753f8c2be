//! Defines [`SpeciesRecord`] and [`RecordStore`], the read-only species table
//! every page draws its names, descriptions, and license notices from.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One row of the species table.
#[derive(Clone, Debug, Deserialize)]
pub struct SpeciesRecord {
    #[serde(rename = "CODE")]
    pub code: String,

    /// The common name in the table's language.
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Latin")]
    pub latin: String,

    #[serde(rename = "text", default)]
    pub description: String,

    /// Plain-text license notice for the species image; used as alt text.
    #[serde(rename = "license notice for plain text", default)]
    pub license_text: String,

    /// HTML license notice for the species image; used verbatim as the
    /// figure caption. Empty cells read as `None`.
    #[serde(
        rename = "license notice HTML (https://lizenzhinweisgenerator.de/)",
        default
    )]
    pub license_markup: Option<String>,
}

/// The species table of one locale, keyed by species code.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<SpeciesRecord>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    /// Loads the `;`-delimited table at `path`.
    pub fn load(path: &Path) -> Result<RecordStore> {
        let file = std::fs::File::open(path).map_err(|err| Error::io(path, err))?;
        Self::from_reader(file, path)
    }

    /// Parses a `;`-delimited table from `reader`. `path` is only used in
    /// error messages.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<RecordStore> {
        let records_err = |source| Error::Records {
            path: path.to_owned(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut store = RecordStore::default();
        for result in reader.deserialize() {
            let mut record: SpeciesRecord = result.map_err(records_err)?;
            if record.license_markup.as_deref().map_or(false, str::is_empty) {
                record.license_markup = None;
            }
            if store.index.contains_key(&record.code) {
                return Err(Error::DuplicateRecord {
                    path: PathBuf::from(path),
                    code: record.code,
                });
            }
            store.index.insert(record.code.clone(), store.records.len());
            store.records.push(record);
        }
        Ok(store)
    }

    /// Looks up a species by its exact code.
    pub fn get(&self, code: &str) -> Result<&SpeciesRecord> {
        self.index
            .get(code)
            .map(|&i| &self.records[i])
            .ok_or_else(|| Error::not_found("species", code))
    }

    /// Iterates the species codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
