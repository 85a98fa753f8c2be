//! Path arithmetic for the output tree. [`PathResolver`] decides where every
//! page lives on disk and how any page or asset is addressed from inside a
//! given page.
//!
//! Relative links are always computed from the *directory containing* the
//! page, never from the page path itself and never from the working
//! directory. Links are expressed as URL references (`file://` URLs made
//! relative to the page directory), so they are percent-encoded exactly the
//! way a browser will decode them.

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::config::Role;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::page::{PageDescriptor, PageKind};
use crate::site::Site;

/// Lexically normalizes `path`: `.` components are dropped and `..`
/// components remove their parent. The file system is not consulted, so
/// symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    // `..` at the root stays at the root
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(normalize(path)).map_err(|()| Error::RelativePath(path.to_owned()))
}

fn directory_url(dir: &Path) -> Result<Url> {
    Url::from_directory_path(normalize(dir)).map_err(|()| Error::RelativePath(dir.to_owned()))
}

/// Expresses the absolute path `target` relative to the absolute directory
/// `from_dir`.
pub fn relative_link(target: &Path, from_dir: &Path) -> Result<String> {
    let base = directory_url(from_dir)?;
    let target_url = file_url(target)?;
    match base.make_relative(&target_url) {
        Some(link) if !link.is_empty() => Ok(link),
        _ => Err(Error::Unrelatable {
            target: target.to_owned(),
            from: from_dir.to_owned(),
        }),
    }
}

/// Resolves `link`, a relative URL reference, against the absolute directory
/// `dir`. This is the inverse of [`relative_link`].
pub fn resolve_link(dir: &Path, link: &str) -> Result<PathBuf> {
    let joined = directory_url(dir)?.join(link).map_err(|source| Error::Link {
        link: link.to_owned(),
        source,
    })?;
    joined.to_file_path().map_err(|()| Error::Unrelatable {
        target: PathBuf::from(link),
        from: dir.to_owned(),
    })
}

/// Computes output paths and relative links for the pages of a [`Site`].
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    site: &'a Site,
}

impl<'a> PathResolver<'a> {
    pub fn new(site: &'a Site) -> Self {
        PathResolver { site }
    }

    /// Returns the absolute path of the page identified by `descriptor`. The
    /// species code of a coded page must exist in the locale's record store;
    /// no path is made up for an unknown species.
    pub fn output_path(&self, descriptor: &PageDescriptor) -> Result<PathBuf> {
        let resources = self.site.resources(descriptor.locale())?;
        if let Some(code) = descriptor.code() {
            resources.records.get(code)?;
        }
        let dir = resources.link_path.dir(descriptor.kind().role());
        Ok(normalize(&dir.join(descriptor.file_name())))
    }

    /// Returns the output path of a page the build actually produces. On top
    /// of [`output_path`](Self::output_path)'s check, a species page needs its
    /// species among the locale's species to build, and a placement page
    /// needs a species in the locale's placement exercise.
    pub fn built_page(&self, descriptor: &PageDescriptor) -> Result<PathBuf> {
        let resources = self.site.resources(descriptor.locale())?;
        if let Some(code) = descriptor.code() {
            match descriptor.kind() {
                PageKind::Species if !resources.species_names.iter().any(|name| name == code) => {
                    return Err(Error::not_found("species page", code));
                }
                PageKind::PlacementPrompt | PageKind::PlacementSuccess
                    if !resources.placement_species.contains(code) =>
                {
                    return Err(Error::not_found("placement page", code));
                }
                _ => {}
            }
        }
        self.output_path(descriptor)
    }

    /// Returns the absolute path of the file `name` in the `role` directory
    /// of `locale`.
    pub fn asset_path(&self, locale: &Locale, role: Role, name: &str) -> Result<PathBuf> {
        let resources = self.site.resources(locale)?;
        Ok(normalize(&resources.link_path.dir(role).join(name)))
    }

    /// Returns the link that addresses the absolute path `target` from inside
    /// the page identified by `descriptor`.
    pub fn relative_to(&self, target: &Path, descriptor: &PageDescriptor) -> Result<String> {
        let page = self.output_path(descriptor)?;
        relative_link(target, page_dir(&page))
    }
}

/// The directory containing `page`.
pub fn page_dir(page: &Path) -> &Path {
    page.parent().unwrap_or(page)
}
