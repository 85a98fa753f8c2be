//! The library code for the `birdsite` static site generator, which builds a
//! multi-language exhibit about birds: one page per species, a start page
//! showing the phylogeny of all of them, and a placement exercise in which
//! visitors guess where a species belongs on a tree.
//!
//! A build has two distinct steps:
//!
//! 1. Loading every locale's resources up front ([`crate::site`]): the
//!    species table, the text bundles, the sequence stores, and the set of
//!    species in the placement exercise.
//! 2. Building each page ([`crate::compose`]) and writing it unless it
//!    already exists.
//!
//! The second step is where the work is. Every page is described by a
//! [`page::PageDescriptor`]; [`paths::PathResolver`] decides where it lives
//! and how it addresses every other file, [`variant`] supplies what differs
//! between kinds of page, and [`svg`] rewrites the links of externally
//! authored graphics so they keep working once pasted into a page.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod compose;
pub mod config;
pub mod error;
pub mod html;
pub mod language;
pub mod locale;
pub mod page;
pub mod paths;
pub mod placement;
pub mod records;
pub mod sequence;
pub mod site;
pub mod svg;
pub mod texts;
pub mod variant;

#[cfg(test)]
mod testing;
