//! Loads the project file (`birdsite.yaml`) into a [`Config`]. Every directory
//! named in the project file is resolved against the project file's own
//! directory, so the resulting [`LinkPath`]s hold absolute roots only.

use crate::locale::Locale;
use crate::paths::normalize;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "birdsite.yaml";

/// The logical directories a page or asset can live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    SpeciesPages,
    PlacementPages,
    StartPages,
    SpeciesImages,
    PlacementImages,
    Stylesheets,
    Sequences,
    Texts,
}

/// The directory layout of one locale. Each field is an absolute directory
/// root for the [`Role`] of the same name, except `records` and
/// `species_names`, which are files.
#[derive(Clone, Debug, Deserialize)]
pub struct LinkPath {
    pub species_pages: PathBuf,
    pub placement_pages: PathBuf,
    pub start_pages: PathBuf,
    pub species_images: PathBuf,
    pub placement_images: PathBuf,
    pub stylesheets: PathBuf,
    pub sequences: PathBuf,
    pub texts: PathBuf,

    /// The `;`-delimited species table.
    pub records: PathBuf,

    /// One species code per line; the species to build pages for. When
    /// absent, every species in `records` gets a page.
    #[serde(default)]
    pub species_names: Option<PathBuf>,
}

impl LinkPath {
    /// Returns the directory root for `role`.
    pub fn dir(&self, role: Role) -> &Path {
        match role {
            Role::SpeciesPages => &self.species_pages,
            Role::PlacementPages => &self.placement_pages,
            Role::StartPages => &self.start_pages,
            Role::SpeciesImages => &self.species_images,
            Role::PlacementImages => &self.placement_images,
            Role::Stylesheets => &self.stylesheets,
            Role::Sequences => &self.sequences,
            Role::Texts => &self.texts,
        }
    }

    /// Resolves every relative entry against `root` and normalizes the
    /// result.
    fn anchor(self, root: &Path) -> LinkPath {
        let anchor = |p: PathBuf| normalize(&root.join(p));
        LinkPath {
            species_pages: anchor(self.species_pages),
            placement_pages: anchor(self.placement_pages),
            start_pages: anchor(self.start_pages),
            species_images: anchor(self.species_images),
            placement_images: anchor(self.placement_images),
            stylesheets: anchor(self.stylesheets),
            sequences: anchor(self.sequences),
            texts: anchor(self.texts),
            records: anchor(self.records),
            species_names: self.species_names.map(anchor),
        }
    }
}

/// Stylesheet file names. `base` lives in the [`Role::Sequences`] directory
/// and is linked from every page; the per-kind sheets live in
/// [`Role::Stylesheets`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Stylesheets {
    pub base: String,
    pub title: String,
    pub species: String,
    pub placement: String,
    pub success: String,
}

impl Default for Stylesheets {
    fn default() -> Self {
        Stylesheets {
            base: "styles.css".to_owned(),
            title: "two_columns.css".to_owned(),
            species: "two_columns.css".to_owned(),
            placement: "two_columns.css".to_owned(),
            success: "two_columns.css".to_owned(),
        }
    }
}

/// One entry of the project file's `locales` list.
#[derive(Clone, Debug, Deserialize)]
pub struct LocaleConfig {
    pub locale: Locale,

    #[serde(flatten)]
    pub paths: LinkPath,
}

#[derive(Deserialize)]
struct Project {
    #[serde(default)]
    stylesheets: Stylesheets,
    locales: Vec<LocaleConfig>,
}

/// The fully resolved configuration for one build.
#[derive(Clone, Debug)]
pub struct Config {
    /// The locales in declaration order. This order is also the order of the
    /// language-switch strip on every page.
    pub locales: Vec<LocaleConfig>,
    pub stylesheets: Stylesheets,

    /// Overwrite output files that already exist.
    pub force: bool,

    /// The number of worker threads; below 2 builds on the calling thread.
    pub threads: usize,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for the project file and
    /// loads the first one found.
    pub fn from_directory(dir: &Path, force: bool, threads: Option<usize>) -> Result<Config> {
        let dir = match dir.is_absolute() {
            true => normalize(dir),
            false => normalize(&std::env::current_dir()?.join(dir)),
        };
        let mut candidate = Some(dir.as_path());
        while let Some(dir) = candidate {
            let path = dir.join(PROJECT_FILE);
            if path.exists() {
                return Config::from_project_file(&path, force, threads)
                    .with_context(|| format!("Loading configuration `{}`", path.display()));
            }
            candidate = dir.parent();
        }
        Err(anyhow!(
            "Could not find `{}` in `{}` or any parent directory",
            PROJECT_FILE,
            dir.display()
        ))
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path, force: bool, threads: Option<usize>) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = match path.parent() {
            Some(root) if root.is_absolute() => root.to_owned(),
            Some(root) => std::env::current_dir()?.join(root),
            None => {
                return Err(anyhow!(
                    "Can't get parent directory for provided project file path '{:?}'",
                    path
                ))
            }
        };

        if project.locales.is_empty() {
            return Err(anyhow!("The project file declares no locales"));
        }
        let mut seen = HashSet::new();
        for entry in &project.locales {
            if !seen.insert(&entry.locale) {
                return Err(anyhow!("Locale `{}` is declared twice", entry.locale));
            }
        }

        Ok(Config {
            locales: project
                .locales
                .into_iter()
                .map(|entry| LocaleConfig {
                    locale: entry.locale,
                    paths: entry.paths.anchor(&project_root),
                })
                .collect(),
            stylesheets: project.stylesheets,
            force,
            threads: match threads {
                None => num_cpus::get(),
                Some(threads) => threads,
            },
        })
    }
}
