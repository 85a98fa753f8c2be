//! The page lifecycle. A [`Composition`] moves through the states
//! [`Empty`], [`HeadBuilt`] and [`BodyBuilt`], one method per transition,
//! and ends in a [`Persisted`] value once the document has been handed to the
//! write-if-absent policy. The type system rules out skipping or repeating a
//! step.
//!
//! The whole document is assembled in memory; nothing is written until
//! [`Composition::persist`].

use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::Role;
use crate::error::{Error, Result};
use crate::html::{el, Document, Element, Node};
use crate::language::LanguageLinker;
use crate::page::PageDescriptor;
use crate::paths::{page_dir, PathResolver};
use crate::site::{LocaleResources, Site};
use crate::svg::transclude_file;
use crate::texts::Bundle;
use crate::variant::{self, PageVariant};

const LANGUAGE_SEPARATOR: &str = " 🐣 ";

/// What a page variant may ask of the page it is being built into. Every
/// link it hands out is relative to the directory of that page.
pub struct PageContext<'a> {
    site: &'a Site,
    resolver: PathResolver<'a>,
    resources: &'a LocaleResources,
    descriptor: &'a PageDescriptor,
}

impl<'a> PageContext<'a> {
    pub fn new(site: &'a Site, descriptor: &'a PageDescriptor) -> Result<Self> {
        Ok(PageContext {
            site,
            resolver: PathResolver::new(site),
            resources: site.resources(descriptor.locale())?,
            descriptor,
        })
    }

    pub fn descriptor(&self) -> &'a PageDescriptor {
        self.descriptor
    }

    /// The resources of the page's own locale.
    pub fn resources(&self) -> &'a LocaleResources {
        self.resources
    }

    pub fn text(&self, bundle: Bundle, key: &str) -> Result<&'a str> {
        self.resources.texts.get(bundle, key)
    }

    /// Links to the file `name` in the `role` directory of the page's locale.
    pub fn link_to(&self, role: Role, name: &str) -> Result<String> {
        let target = self
            .resolver
            .asset_path(self.descriptor.locale(), role, name)?;
        self.resolver.relative_to(&target, self.descriptor)
    }

    /// Links to another generated page. A page the build doesn't produce is
    /// `NotFound` rather than a dangling link.
    pub fn link_to_page(&self, page: &PageDescriptor) -> Result<String> {
        let target = self.resolver.built_page(page)?;
        self.resolver.relative_to(&target, self.descriptor)
    }

    /// Reads the SVG file `name` in the `role` directory and returns its
    /// markup with every link rewritten for this page.
    pub fn transclude(&self, role: Role, name: &str) -> Result<String> {
        let asset = self
            .resolver
            .asset_path(self.descriptor.locale(), role, name)?;
        transclude_file(self.resolver, &asset, self.descriptor)
    }
}

/// Nothing has been emitted yet.
pub struct Empty;

/// The `<head>` is complete.
pub struct HeadBuilt;

/// The `<body>` is complete; the document can be rendered or persisted.
pub struct BodyBuilt;

/// A document under construction, in lifecycle state `S`.
pub struct Composition<'a, S> {
    cx: PageContext<'a>,
    variant: Box<dyn PageVariant + 'a>,
    document: Document,
    state: PhantomData<S>,
}

impl<'a, S> Composition<'a, S> {
    fn advance<T>(self) -> Composition<'a, T> {
        Composition {
            cx: self.cx,
            variant: self.variant,
            document: self.document,
            state: PhantomData,
        }
    }

    /// The document as composed so far.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl<'a> Composition<'a, Empty> {
    /// Starts the page identified by `descriptor`. Fails if the page can't
    /// exist, e.g. for an unknown species.
    pub fn new(site: &'a Site, descriptor: &'a PageDescriptor) -> Result<Self> {
        let cx = PageContext::new(site, descriptor)?;
        let variant = variant::for_page(&cx)?;
        log::debug!("Composing `{}` as a {} page", descriptor, variant.kind());
        let document = Document::new(descriptor.locale().as_str(), &variant.title(&cx)?);
        Ok(Composition {
            cx,
            variant,
            document,
            state: PhantomData,
        })
    }

    /// Emits the meta tags, the shared and the kind-specific stylesheet, and
    /// the variant's script, if any.
    pub fn build_head(mut self) -> Result<Composition<'a, HeadBuilt>> {
        let cx = &self.cx;
        let sheets = &cx.site.stylesheets;
        let mut head: Vec<Node> = vec![
            el("meta").attr("charset", "UTF-8").into(),
            el("meta").attr("lang", cx.descriptor.locale().as_str()).into(),
            stylesheet(cx.link_to(Role::Sequences, &sheets.base)?),
            stylesheet(cx.link_to(Role::Stylesheets, self.variant.stylesheet(sheets))?),
        ];
        if let Some(script) = self.variant.script() {
            head.push(
                el("script")
                    .attr("type", "text/javascript")
                    .attr("src", cx.link_to(Role::StartPages, script)?)
                    .into(),
            );
        }
        self.document.head = head;
        Ok(self.advance())
    }
}

fn stylesheet(href: String) -> Node {
    el("link").attr("rel", "stylesheet").attr("href", href).into()
}

impl<'a> Composition<'a, HeadBuilt> {
    /// Emits the language strip, the variant's body, and the back button, in
    /// that order.
    pub fn build_body(mut self) -> Result<Composition<'a, BodyBuilt>> {
        let mut body = Vec::new();
        if let Some(strip) = language_strip(&self.cx)? {
            body.push(strip.into());
        }
        body.extend(self.variant.body(&self.cx)?);
        body.push(back_button(&self.cx)?.into());
        self.document.body = body;
        Ok(self.advance())
    }
}

fn language_strip(cx: &PageContext) -> Result<Option<Element>> {
    let links = LanguageLinker::new(cx.site).sibling_links(cx.descriptor)?;
    if links.is_empty() {
        return Ok(None);
    }
    let own = cx.descriptor.locale();
    let mut strip = el("div")
        .class("language_choice")
        .attr("align", "right")
        .child(el("p").text(cx.text(Bundle::Basics, "changelang")?));
    let mut first = true;
    for locale in cx.site.locales() {
        let name = cx.text(Bundle::Basics, locale.as_str())?;
        let entry = if locale == own {
            el("span").class("current").text(name)
        } else {
            match links.iter().find(|(l, _)| l == locale) {
                Some((_, href)) => el("a")
                    .attr("href", href.as_str())
                    .child(el("span").text(name)),
                None => continue,
            }
        };
        if !first {
            strip = strip.child(el("span").text(LANGUAGE_SEPARATOR));
        }
        strip = strip.child(entry);
        first = false;
    }
    Ok(Some(strip))
}

fn back_button(cx: &PageContext) -> Result<Element> {
    Ok(el("form").child(
        el("input")
            .attr("type", "button")
            .attr("value", cx.text(Bundle::Basics, "back")?)
            .attr("onclick", "history.back()"),
    ))
}

/// What the write-if-absent policy did with a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Written,

    /// The file already existed and overwriting wasn't forced.
    Skipped,
}

/// The terminal state of a composition: where the page lives and whether
/// this build wrote it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Persisted {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl<'a> Composition<'a, BodyBuilt> {
    pub fn render(&self) -> Result<String> {
        let path = self.cx.resolver.output_path(self.cx.descriptor)?;
        self.document.render().map_err(|err| Error::io(path, err))
    }

    /// Writes the document to its output path, creating directories as
    /// needed. An existing file is left untouched unless `force` is set.
    pub fn persist(self, force: bool) -> Result<Persisted> {
        let path = self.cx.resolver.output_path(self.cx.descriptor)?;
        let markup = self.render()?;
        let outcome = write_if_absent(&path, &markup, force)?;
        match outcome {
            Outcome::Written => log::info!("Wrote `{}`", path.display()),
            Outcome::Skipped => log::warn!(
                "`{}` already exists; not overwriting without --force",
                path.display()
            ),
        }
        Ok(Persisted { path, outcome })
    }
}

// The page is written to a temporary file next to `path` and moved into
// place, so `path` either holds a whole page or nothing.
fn write_if_absent(path: &Path, contents: &str, force: bool) -> Result<Outcome> {
    let dir = page_dir(path);
    fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))?;
    if !force && path.exists() {
        return Ok(Outcome::Skipped);
    }
    let mut file = NamedTempFile::new_in(dir).map_err(|err| Error::io(dir, err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| Error::io(file.path(), err))?;
    let persisted = match force {
        true => file.persist(path),
        false => file.persist_noclobber(path),
    };
    match persisted {
        Ok(_) => Ok(Outcome::Written),
        // another build created the page in the meantime
        Err(err) if !force && err.error.kind() == io::ErrorKind::AlreadyExists => {
            Ok(Outcome::Skipped)
        }
        Err(err) => Err(Error::io(path, err.error)),
    }
}

/// Drives the lifecycle for whole pages.
#[derive(Clone, Copy)]
pub struct DocumentComposer<'a> {
    site: &'a Site,
}

impl<'a> DocumentComposer<'a> {
    pub fn new(site: &'a Site) -> Self {
        DocumentComposer { site }
    }

    /// Runs every step short of persisting.
    pub fn compose(&self, descriptor: &'a PageDescriptor) -> Result<Composition<'a, BodyBuilt>> {
        Composition::new(self.site, descriptor)?
            .build_head()?
            .build_body()
    }

    /// Builds the page identified by `descriptor` and persists it.
    pub fn build(&self, descriptor: &'a PageDescriptor, force: bool) -> Result<Persisted> {
        log::debug!("Building `{}`", descriptor);
        self.compose(descriptor)?.persist(force)
    }
}
