//! Defines [`PageKind`] and [`PageDescriptor`], which together identify one
//! concrete output page, and the path template for each kind of page.

use std::fmt;

use crate::config::Role;
use crate::locale::Locale;

/// The name of the site's start page inside [`Role::StartPages`].
pub const TITLE_PAGE: &str = "title.html";

/// The shared page every wrong placement guess links to.
pub const ERROR_PAGE: &str = "error.html";

/// The background page linked from the start page.
pub const INFO_PAGE: &str = "info.html";

/// The entry page of the placement exercise linked from the start page.
pub const EXERCISE_PAGE: &str = "exercise.html";

/// The four kinds of generated page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageKind {
    Title,
    Species,
    PlacementPrompt,
    PlacementSuccess,
}

impl PageKind {
    /// The directory role a page of this kind is written into.
    pub fn role(self) -> Role {
        match self {
            PageKind::Title => Role::StartPages,
            PageKind::Species => Role::SpeciesPages,
            PageKind::PlacementPrompt | PageKind::PlacementSuccess => Role::PlacementPages,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            PageKind::Title => "title",
            PageKind::Species => "species",
            PageKind::PlacementPrompt => "placement",
            PageKind::PlacementSuccess => "success",
        })
    }
}

/// Identifies one output page: its locale, its kind, and for every kind but
/// [`PageKind::Title`] the species code it is about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageDescriptor {
    locale: Locale,
    kind: PageKind,
    code: Option<String>,
}

impl PageDescriptor {
    pub fn title(locale: Locale) -> Self {
        PageDescriptor {
            locale,
            kind: PageKind::Title,
            code: None,
        }
    }

    pub fn species(locale: Locale, code: &str) -> Self {
        Self::coded(locale, PageKind::Species, code)
    }

    pub fn placement_prompt(locale: Locale, code: &str) -> Self {
        Self::coded(locale, PageKind::PlacementPrompt, code)
    }

    pub fn placement_success(locale: Locale, code: &str) -> Self {
        Self::coded(locale, PageKind::PlacementSuccess, code)
    }

    fn coded(locale: Locale, kind: PageKind, code: &str) -> Self {
        PageDescriptor {
            locale,
            kind,
            code: Some(code.to_owned()),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The same page in another language.
    pub fn with_locale(&self, locale: Locale) -> Self {
        PageDescriptor {
            locale,
            kind: self.kind,
            code: self.code.clone(),
        }
    }

    /// Expands the file-name template of the page's kind. Kinds that carry
    /// a species code derive their name from it; the title page has a fixed
    /// name.
    pub fn file_name(&self) -> String {
        match (self.kind, self.code()) {
            (PageKind::Species, Some(code)) => format!("{}.html", code),
            (PageKind::PlacementPrompt, Some(code)) => format!("{}_placement.html", code),
            (PageKind::PlacementSuccess, Some(code)) => format!("{}_success.html", code),
            // the constructors pair every coded kind with a code
            _ => TITLE_PAGE.to_owned(),
        }
    }
}

impl fmt::Display for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}/{}/{}", self.locale, self.kind, code),
            None => write!(f, "{}/{}", self.locale, self.kind),
        }
    }
}
