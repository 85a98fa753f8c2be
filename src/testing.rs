//! Test support: a two-locale site materialized in a temporary directory.

#[path = "../tests/common/mod.rs"]
mod common;

use std::path::Path;

use tempfile::TempDir;

use crate::config::{Config, PROJECT_FILE};
use crate::locale::Locale;
use crate::site::Site;

pub(crate) struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Fixture {
        let dir = TempDir::new().unwrap();
        common::write_site(dir.path());
        Fixture { dir }
    }

    /// The project root; every configured directory lies below it.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self, force: bool) -> Config {
        Config::from_project_file(&self.root().join(PROJECT_FILE), force, Some(1)).unwrap()
    }

    pub fn site(&self) -> Site {
        Site::load(&self.config(false)).unwrap()
    }

    /// Overwrites (or creates) the file at `relative` below the root.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// Gives `gr` a placement exercise of WREN alone and builds only its
    /// WREN species page.
    pub fn narrow_gr(&self) {
        common::narrow_gr(self.root());
    }

    pub fn en(&self) -> Locale {
        "en".parse().unwrap()
    }

    pub fn gr(&self) -> Locale {
        "gr".parse().unwrap()
    }
}
