//! Transclusion of externally authored SVG markup into generated pages.
//!
//! An SVG file addresses its images and other resources relative to its own
//! location. Once its markup is pasted into a page elsewhere in the output
//! tree, those links would resolve against the page's directory instead, so
//! every `href="..."` value is re-expressed relative to the embedding page.
//! Nothing else on a line is touched.

use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use url::Url;

use crate::error::{Error, Result};
use crate::page::PageDescriptor;
use crate::paths::{page_dir, resolve_link, PathResolver};

const LINK_PATTERN: &str = r#"href="([^"]*)""#;

static LINK_REGEX: OnceLock<Regex> = OnceLock::new();

// Compiled once per process and shared by every transclusion.
fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| Regex::new(LINK_PATTERN).expect("the link pattern is a valid regex"))
}

/// Rewrites SVG markup one line at a time. Created by [`rewrite`]; each
/// instance is bound to one embedding page and consumes its input once.
pub struct Transclusion<'a, I> {
    lines: I,
    source: PathBuf,
    asset_dir: PathBuf,
    resolver: PathResolver<'a>,
    descriptor: &'a PageDescriptor,
}

/// Rewrites the links of `lines`, markup that originally lived in
/// `asset_dir`, so that they resolve from the page identified by
/// `descriptor`.
pub fn rewrite<'a, I>(
    resolver: PathResolver<'a>,
    lines: I,
    asset_dir: &Path,
    descriptor: &'a PageDescriptor,
) -> Transclusion<'a, I::IntoIter>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    Transclusion::new(resolver, lines.into_iter(), asset_dir, descriptor, asset_dir)
}

/// Reads the SVG file at `asset` and returns its markup rewritten for the page
/// identified by `descriptor`. Lines are joined with `\n`.
pub fn transclude_file(
    resolver: PathResolver<'_>,
    asset: &Path,
    descriptor: &PageDescriptor,
) -> Result<String> {
    let file = File::open(asset).map_err(|err| Error::io(asset, err))?;
    let lines = BufReader::new(file).lines();
    let transclusion = Transclusion::new(resolver, lines, page_dir(asset), descriptor, asset);
    Ok(transclusion.collect::<Result<Vec<String>>>()?.join("\n"))
}

impl<'a, I> Transclusion<'a, I> {
    fn new(
        resolver: PathResolver<'a>,
        lines: I,
        asset_dir: &Path,
        descriptor: &'a PageDescriptor,
        source: &Path,
    ) -> Self {
        Transclusion {
            lines,
            source: source.to_owned(),
            asset_dir: asset_dir.to_owned(),
            resolver,
            descriptor,
        }
    }

    /// Rewrites every link on `line`.
    pub fn rewrite_line(&self, line: &str) -> Result<String> {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        for captures in link_regex().captures_iter(line) {
            let value = match captures.get(1) {
                Some(value) => value,
                None => continue,
            };
            out.push_str(&line[last..value.start()]);
            out.push_str(&self.rewrite_link(value.as_str())?);
            last = value.end();
        }
        out.push_str(&line[last..]);
        Ok(out)
    }

    fn rewrite_link<'l>(&self, link: &'l str) -> Result<Cow<'l, str>> {
        if is_external(link) {
            return Ok(Cow::Borrowed(link));
        }
        // queries and fragments are carried over untouched
        let split = link.find(|c: char| c == '?' || c == '#').unwrap_or(link.len());
        let (path, suffix) = link.split_at(split);
        let target = resolve_link(&self.asset_dir, path)?;
        let relinked = self.resolver.relative_to(&target, self.descriptor)?;
        Ok(Cow::Owned(format!("{}{}", relinked, suffix)))
    }
}

/// Links that don't address a file next to the asset: empty links,
/// same-document fragments, and URLs with a scheme other than `file`.
fn is_external(link: &str) -> bool {
    if link.is_empty() || link.starts_with('#') {
        return true;
    }
    match Url::parse(link) {
        Ok(url) => url.scheme() != "file",
        Err(_) => false,
    }
}

impl<I> Iterator for Transclusion<'_, I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(match self.lines.next()? {
            Ok(line) => self.rewrite_line(&line),
            Err(err) => Err(Error::io(&self.source, err)),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::paths::relative_link;
    use crate::testing::Fixture;
    use proptest::prelude::*;

    fn lines(markup: &str) -> Vec<io::Result<String>> {
        markup.lines().map(|l| Ok(l.to_owned())).collect()
    }

    fn links(markup: &str) -> Vec<String> {
        link_regex()
            .captures_iter(markup)
            .map(|c| c[1].to_owned())
            .collect()
    }

    #[test]
    fn test_link_regex_shared() {
        assert!(std::ptr::eq(link_regex(), link_regex()));
        assert_eq!(vec!["a.svg", ""], links("<use href=\"a.svg\"/><a href=\"\">"));
    }

    #[test]
    fn test_rewrite_relative_to_page_directory() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let resolver = PathResolver::new(&site);
        let page = PageDescriptor::species(fixture.en(), "ROBIN");
        let asset_dir = fixture.root().join("assets/img/placement");

        let markup = "<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n\
                      <image x=\"0\" xlink:href=\"../birds/ROBIN.png\" width=\"10\"/>\n\
                      <a href=\"#top\"><rect/></a>\n\
                      <a href=\"https://example.org/robin\" data-x=\"1\">Robin</a>\n\
                      </svg>";
        let rewritten = rewrite(resolver, lines(markup), &asset_dir, &page)
            .collect::<Result<Vec<String>>>()?;

        assert_eq!(
            vec![
                "<svg xmlns:xlink=\"http://www.w3.org/1999/xlink\">",
                "<image x=\"0\" xlink:href=\"../../../assets/img/birds/ROBIN.png\" width=\"10\"/>",
                "<a href=\"#top\"><rect/></a>",
                "<a href=\"https://example.org/robin\" data-x=\"1\">Robin</a>",
                "</svg>",
            ],
            rewritten
        );
        Ok(())
    }

    #[test]
    fn test_rewrite_every_link_on_a_line() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let page = PageDescriptor::title(fixture.en());
        let asset_dir = fixture.root().join("assets/img/placement");
        let markup = "<a href=\"../birds/WREN.png?v=2\"/><a href=\"tree.svg#node\"/>";
        let rewritten = rewrite(PathResolver::new(&site), lines(markup), &asset_dir, &page)
            .collect::<Result<Vec<String>>>()?;
        assert_eq!(
            vec!["<a href=\"../../assets/img/birds/WREN.png?v=2\"/><a href=\"../../assets/img/placement/tree.svg#node\"/>"],
            rewritten
        );
        Ok(())
    }

    #[test]
    fn test_transclude_missing_file() {
        let fixture = Fixture::new();
        let site = fixture.site();
        let page = PageDescriptor::title(fixture.en());
        let missing = fixture.root().join("assets/img/placement/nope.svg");
        assert!(matches!(
            transclude_file(PathResolver::new(&site), &missing, &page),
            Err(Error::Io { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_rewrite_preserves_links(
            targets in prop::collection::vec(
                (prop::sample::select(vec!["..", "birds", "placement", "css", "x y"]), "[a-z]{1,5}"),
                1..6,
            ),
            species in prop::bool::ANY,
        ) {
            let fixture = Fixture::new();
            let site = fixture.site();
            let resolver = PathResolver::new(&site);
            let page = match species {
                true => PageDescriptor::species(fixture.gr(), "WREN"),
                false => PageDescriptor::placement_success(fixture.en(), "ROBIN"),
            };
            let asset_dir = fixture.root().join("assets/img/placement");
            let markup: String = targets
                .iter()
                .map(|(dir, name)| format!("<use data-k=\"v\" href=\"../{}/{}.svg\"/>\n", dir, name))
                .collect();

            let rewritten = rewrite(resolver, lines(&markup), &asset_dir, &page)
                .collect::<Result<Vec<String>>>()
                .unwrap()
                .join("\n");

            let before = links(&markup);
            let after = links(&rewritten);
            prop_assert_eq!(before.len(), after.len());

            let page_path = resolver.output_path(&page).unwrap();
            for (original, relinked) in before.iter().zip(after.iter()) {
                let wanted = resolve_link(&asset_dir, original).unwrap();
                let found = resolve_link(page_dir(&page_path), relinked).unwrap();
                prop_assert_eq!(&wanted, &found);
                prop_assert_eq!(relinked, &relative_link(&wanted, page_dir(&page_path)).unwrap());
            }
        }
    }
}
