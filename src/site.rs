//! Defines [`Site`], the read-only state shared by every page build: the
//! configuration plus every per-locale resource, all loaded up front.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{Config, LinkPath, Stylesheets};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::placement::placement_species;
use crate::records::RecordStore;
use crate::sequence::ShortSequences;
use crate::texts::Texts;

/// Everything one locale contributes to a build.
#[derive(Debug)]
pub struct LocaleResources {
    pub locale: Locale,
    pub link_path: LinkPath,
    pub records: RecordStore,
    pub texts: Texts,
    pub short_sequences: ShortSequences,

    /// Species codes that take part in the placement exercise.
    pub placement_species: BTreeSet<String>,

    /// Species codes to build species pages for, in build order.
    pub species_names: Vec<String>,
}

impl LocaleResources {
    /// Loads every resource named by `link_path`.
    pub fn load(locale: Locale, link_path: LinkPath) -> Result<LocaleResources> {
        log::debug!("Loading resources for locale `{}`", locale);
        let records = RecordStore::load(&link_path.records)?;
        let texts = Texts::load(&link_path.texts)?;
        let short_sequences = ShortSequences::load(&link_path.sequences)?;
        let placement_species = placement_species(&link_path.placement_images)?;
        let species_names = match &link_path.species_names {
            Some(path) => read_names(path)?,
            None => records.codes().map(str::to_owned).collect(),
        };
        log::info!(
            "Locale `{}`: {} species, {} to build, {} in the placement exercise",
            locale,
            records.len(),
            species_names.len(),
            placement_species.len(),
        );
        Ok(LocaleResources {
            locale,
            link_path,
            records,
            texts,
            short_sequences,
            placement_species,
            species_names,
        })
    }
}

fn read_names(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// The configuration and resources of every locale. Built once per process
/// and then shared read-only by all page builds.
#[derive(Debug)]
pub struct Site {
    pub stylesheets: Stylesheets,
    locales: Vec<LocaleResources>,
}

impl Site {
    /// Loads the resources of every configured locale. Any missing resource
    /// fails here, before a single page is composed.
    pub fn load(config: &Config) -> Result<Site> {
        let locales = config
            .locales
            .iter()
            .map(|entry| LocaleResources::load(entry.locale.clone(), entry.paths.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Site::from_resources(config.stylesheets.clone(), locales))
    }

    /// Assembles a site from already loaded resources. The order of
    /// `locales` is the order of the language-switch strip.
    pub fn from_resources(stylesheets: Stylesheets, locales: Vec<LocaleResources>) -> Site {
        Site {
            stylesheets,
            locales,
        }
    }

    /// Iterates the locales in declaration order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter().map(|r| &r.locale)
    }

    /// Iterates the resources of every locale in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocaleResources> {
        self.locales.iter()
    }

    pub fn resources(&self, locale: &Locale) -> Result<&LocaleResources> {
        self.locales
            .iter()
            .find(|r| &r.locale == locale)
            .ok_or_else(|| Error::UnknownLocale(locale.clone()))
    }
}
