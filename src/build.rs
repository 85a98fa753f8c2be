//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the site: loading every locale's resources
//! ([`crate::site`]), enumerating the pages to build, and composing and
//! persisting each of them ([`crate::compose`]), either on the calling thread
//! or on a pool of worker threads.
//!
//! A page that fails to build is logged and reported; it never stops the
//! remaining pages.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::compose::{DocumentComposer, Outcome, Persisted};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::page::PageDescriptor;
use crate::paths::PathResolver;
use crate::site::Site;

/// A page that couldn't be built, and why.
#[derive(Debug)]
pub struct Failure {
    pub descriptor: PageDescriptor,
    pub error: Error,
}

/// The outcome of a build, page by page.
#[derive(Debug, Default)]
pub struct Report {
    /// Pages written by this build.
    pub written: Vec<PathBuf>,

    /// Pages that already existed and were left alone.
    pub skipped: Vec<PathBuf>,

    pub failed: Vec<Failure>,
}

impl Report {
    /// Whether every page was either written or skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, descriptor: &PageDescriptor, result: Result<Persisted>) {
        match result {
            Ok(Persisted {
                path,
                outcome: Outcome::Written,
            }) => self.written.push(path),
            Ok(Persisted {
                path,
                outcome: Outcome::Skipped,
            }) => self.skipped.push(path),
            Err(error) => {
                log::error!("Failed to build `{}`: {}", descriptor, error);
                self.failed.push(Failure {
                    descriptor: descriptor.clone(),
                    error,
                });
            }
        }
    }

    fn merge(&mut self, other: Report) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }
}

/// Builds the site from a [`Config`] object. Resources are loaded first, so
/// a missing or malformed resource fails the whole build before a single page
/// is written; after that, failures are isolated per page.
pub fn build_site(config: &Config) -> Result<Report> {
    let site = Site::load(config)?;
    let descriptors = descriptors(&site);
    log::info!(
        "Building {} pages on {} thread(s)",
        descriptors.len(),
        config.threads.max(1)
    );

    let report = build_pages(&site, &descriptors, config.force, config.threads);
    log::info!(
        "{} written, {} skipped, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Lists every page of the site: per locale (in declaration order) the title
/// page, each species page, and both placement pages for every species in
/// the placement exercise.
///
/// A page whose output path was already claimed by an earlier page is
/// dropped, so no two builds ever target the same file.
pub fn descriptors(site: &Site) -> Vec<PageDescriptor> {
    let resolver = PathResolver::new(site);
    let mut claimed = HashSet::new();
    let mut descriptors = Vec::new();
    for resources in site.iter() {
        let locale = &resources.locale;
        let mut candidates = vec![PageDescriptor::title(locale.clone())];
        for code in &resources.species_names {
            candidates.push(PageDescriptor::species(locale.clone(), code));
        }
        for code in &resources.placement_species {
            candidates.push(PageDescriptor::placement_prompt(locale.clone(), code));
            candidates.push(PageDescriptor::placement_success(locale.clone(), code));
        }

        for descriptor in candidates {
            // Pages without a path keep their place and fail when built.
            if let Ok(path) = resolver.output_path(&descriptor) {
                if !claimed.insert(path) {
                    log::debug!("`{}` shares its output path with another page", descriptor);
                    continue;
                }
            }
            descriptors.push(descriptor);
        }
    }
    descriptors
}

/// Builds `descriptors`. Below two threads everything runs on the calling
/// thread.
pub fn build_pages(site: &Site, descriptors: &[PageDescriptor], force: bool, threads: usize) -> Report {
    if threads < 2 {
        build_pages_singlethreaded(site, descriptors, force)
    } else {
        build_pages_parallel(site, descriptors, force, threads)
    }
}

fn build_pages_singlethreaded(site: &Site, descriptors: &[PageDescriptor], force: bool) -> Report {
    let composer = DocumentComposer::new(site);
    let mut report = Report::default();
    for descriptor in descriptors {
        report.record(descriptor, composer.build(descriptor, force));
    }
    report
}

fn build_pages_parallel(
    site: &Site,
    descriptors: &[PageDescriptor],
    force: bool,
    threads: usize,
) -> Report {
    use crossbeam_channel::unbounded;
    use std::thread;

    let (tx, rx) = unbounded::<&PageDescriptor>();
    for descriptor in descriptors {
        // `rx` outlives the loop, so the channel is still open
        if tx.send(descriptor).is_err() {
            break;
        }
    }
    drop(tx);

    let mut report = thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|_| {
                let rx = rx.clone();
                scope.spawn(move || {
                    let composer = DocumentComposer::new(site);
                    let mut report = Report::default();
                    for descriptor in rx {
                        report.record(descriptor, composer.build(descriptor, force));
                    }
                    report
                })
            })
            .collect();

        let mut report = Report::default();
        for worker in workers {
            match worker.join() {
                Ok(part) => report.merge(part),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        report
    });
    report.written.sort();
    report.skipped.sort();
    report
}
