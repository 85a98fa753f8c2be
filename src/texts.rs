//! Loads the per-locale text bundles that supply every user-visible string.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The bundles a locale provides, one per page kind plus the shared basics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bundle {
    /// Strings on every page: the language strip and the back button.
    Basics,
    Title,
    Species,
    Placement,
    Success,
}

impl Bundle {
    pub const ALL: [Bundle; 5] = [
        Bundle::Basics,
        Bundle::Title,
        Bundle::Species,
        Bundle::Placement,
        Bundle::Success,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Bundle::Basics => "basics.yml",
            Bundle::Title => "title.yml",
            Bundle::Species => "birdpage.yml",
            Bundle::Placement => "placement.yml",
            Bundle::Success => "success.yml",
        }
    }
}

// Bundles are authored either as `key: text` or as `key: {FILL_IN: text}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Plain(String),
    Filled {
        #[serde(rename = "FILL_IN")]
        fill_in: String,
    },
}

impl Entry {
    fn into_text(self) -> String {
        match self {
            Entry::Plain(text) => text,
            Entry::Filled { fill_in } => fill_in,
        }
    }
}

/// One parsed bundle file.
#[derive(Debug)]
pub struct TextBundle {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl TextBundle {
    pub fn load(path: &Path) -> Result<TextBundle> {
        let file = std::fs::File::open(path).map_err(|err| Error::io(path, err))?;
        let entries: HashMap<String, Entry> =
            serde_yaml::from_reader(file).map_err(|source| Error::Texts {
                path: path.to_owned(),
                source,
            })?;
        Ok(TextBundle {
            path: path.to_owned(),
            entries: entries
                .into_iter()
                .map(|(key, entry)| (key, entry.into_text()))
                .collect(),
        })
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingText {
                bundle: self.path.clone(),
                key: key.to_owned(),
            })
    }
}

/// All bundles of one locale, loaded together so a missing file surfaces
/// before any page is composed.
#[derive(Debug)]
pub struct Texts {
    bundles: HashMap<Bundle, TextBundle>,
}

impl Texts {
    pub fn load(dir: &Path) -> Result<Texts> {
        let mut bundles = HashMap::new();
        for &bundle in Bundle::ALL.iter() {
            let path = dir.join(bundle.file_name());
            log::debug!("Loading text bundle `{}`", path.display());
            bundles.insert(bundle, TextBundle::load(&path)?);
        }
        Ok(Texts { bundles })
    }

    pub fn get(&self, bundle: Bundle, key: &str) -> Result<&str> {
        match self.bundles.get(&bundle) {
            Some(texts) => texts.get(key),
            None => Err(Error::not_found("text bundle", bundle.file_name())),
        }
    }
}
