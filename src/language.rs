//! Links every page to the same page in the other configured languages.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::page::PageDescriptor;
use crate::paths::{page_dir, relative_link, PathResolver};
use crate::site::Site;

/// Produces the language-switch links of a page.
#[derive(Clone, Copy)]
pub struct LanguageLinker<'a> {
    site: &'a Site,
    resolver: PathResolver<'a>,
}

impl<'a> LanguageLinker<'a> {
    pub fn new(site: &'a Site) -> Self {
        LanguageLinker {
            site,
            resolver: PathResolver::new(site),
        }
    }

    /// Returns a `(locale, link)` pair for every other configured locale, in
    /// declaration order, where `link` addresses the same page in that locale
    /// from inside the page identified by `descriptor`.
    ///
    /// Locales that don't build the page, because the species is unknown
    /// there, isn't listed for building, or isn't part of that locale's
    /// placement exercise, are left out with a warning.
    /// A locale whose page has the same output path as `descriptor`'s is not
    /// a separate variant and is left out silently, so a page kind without
    /// per-locale variants gets no links at all.
    pub fn sibling_links(&self, descriptor: &PageDescriptor) -> Result<Vec<(Locale, String)>> {
        let own_path = self.resolver.output_path(descriptor)?;
        let mut links = Vec::new();
        for locale in self.site.locales() {
            if locale == descriptor.locale() {
                continue;
            }
            let sibling = descriptor.with_locale(locale.clone());
            let target = match self.resolver.built_page(&sibling) {
                Ok(target) => target,
                Err(err @ Error::NotFound { .. }) => {
                    log::warn!("No `{}` variant of `{}`: {}", locale, descriptor, err);
                    continue;
                }
                Err(err) => return Err(err),
            };
            if target == own_path {
                continue;
            }
            let substituted = substitute_locale(&own_path, descriptor.locale(), locale);
            if substituted != target {
                log::debug!(
                    "Locale substitution for `{}` gives `{}`, layout says `{}`",
                    sibling,
                    substituted.display(),
                    target.display()
                );
            }
            links.push((locale.clone(), relative_link(&target, page_dir(&own_path))?));
        }
        Ok(links)
    }
}

/// Replaces every path component that is exactly the `from` locale token
/// with the `to` token.
fn substitute_locale(path: &Path, from: &Locale, to: &Locale) -> PathBuf {
    path.components()
        .map(|component| match component {
            Component::Normal(name) if name == OsStr::new(from.as_str()) => {
                OsStr::new(to.as_str())
            }
            other => other.as_os_str(),
        })
        .collect()
}
