//! The four kinds of generated page. Each [`PageVariant`] supplies the
//! parts of a document that differ between kinds; [`crate::compose`] drives
//! the shared lifecycle around them.

use crate::compose::PageContext;
use crate::config::{Role, Stylesheets};
use crate::error::{Error, Result};
use crate::html::{el, Element, Node};
use crate::page::{PageDescriptor, PageKind, ERROR_PAGE, EXERCISE_PAGE, INFO_PAGE};
use crate::placement::{answer_asset, question_asset, GLOBAL_TREE};
use crate::records::SpeciesRecord;
use crate::sequence::long_sequence;
use crate::texts::Bundle;

/// The caption shown under a species image whose license markup is absent.
pub const MISSING_CAPTION: &str = "Missing.";

/// The per-kind behavior of a page.
pub trait PageVariant {
    fn kind(&self) -> PageKind;

    /// The text of the document's `<title>`.
    fn title(&self, cx: &PageContext) -> Result<String>;

    /// The kind-specific stylesheet, a file in the [`Role::Stylesheets`]
    /// directory.
    fn stylesheet<'s>(&self, sheets: &'s Stylesheets) -> &'s str;

    /// The kind-specific part of the body, placed between the language strip
    /// and the back button.
    fn body(&self, cx: &PageContext) -> Result<Vec<Node>>;

    /// A script in the [`Role::StartPages`] directory to load in the head.
    fn script(&self) -> Option<&str> {
        None
    }
}

/// Selects the variant for the page `cx` is building and checks its
/// preconditions: a species page needs a known species, and a placement page
/// additionally needs a species that takes part in the placement exercise.
pub fn for_page<'a>(cx: &PageContext<'a>) -> Result<Box<dyn PageVariant + 'a>> {
    let descriptor = cx.descriptor();
    let kind = descriptor.kind();
    if kind == PageKind::Title {
        return Ok(Box::new(TitlePage));
    }
    let code = descriptor
        .code()
        .ok_or_else(|| Error::not_found("species code for page", descriptor.to_string()))?;
    let record = cx.resources().records.get(code)?;
    let variant: Box<dyn PageVariant + 'a> = match kind {
        PageKind::Species => Box::new(SpeciesPage { record }),
        PageKind::PlacementPrompt => Box::new(PlacementPrompt {
            record: placement_record(cx, record)?,
        }),
        _ => Box::new(PlacementSuccess {
            record: placement_record(cx, record)?,
        }),
    };
    Ok(variant)
}

fn placement_record<'a>(
    cx: &PageContext<'a>,
    record: &'a SpeciesRecord,
) -> Result<&'a SpeciesRecord> {
    match cx.resources().placement_species.contains(&record.code) {
        true => Ok(record),
        false => Err(Error::InvalidState {
            code: record.code.clone(),
        }),
    }
}

/// The start page: the tree of every species plus the entry points to the
/// background page and the placement exercise.
pub struct TitlePage;

impl PageVariant for TitlePage {
    fn kind(&self) -> PageKind {
        PageKind::Title
    }

    fn title(&self, cx: &PageContext) -> Result<String> {
        Ok(cx.text(Bundle::Title, "title")?.to_owned())
    }

    fn stylesheet<'s>(&self, sheets: &'s Stylesheets) -> &'s str {
        &sheets.title
    }

    fn body(&self, cx: &PageContext) -> Result<Vec<Node>> {
        let tree = tree_figure(
            cx,
            GLOBAL_TREE,
            cx.text(Bundle::Title, "tree_alt")?,
            Some(cx.text(Bundle::Title, "tree_caption")?),
        )?;
        let info = button(cx.link_to(Role::StartPages, INFO_PAGE)?, cx.text(Bundle::Title, "button1")?);
        let exercise = button(
            cx.link_to(Role::StartPages, EXERCISE_PAGE)?,
            cx.text(Bundle::Title, "button2")?,
        );
        Ok(vec![
            header(cx.text(Bundle::Title, "header")?, cx.text(Bundle::Title, "subheader")?).into(),
            el("div")
                .class("row")
                .child(el("div").class("column").child(tree))
                .child(
                    el("div")
                        .class("column")
                        .child(el("p").text(cx.text(Bundle::Title, "text")?))
                        .child(info)
                        .child(exercise),
                )
                .into(),
        ])
    }
}

/// The page about one species.
pub struct SpeciesPage<'a> {
    record: &'a SpeciesRecord,
}

impl PageVariant for SpeciesPage<'_> {
    fn kind(&self) -> PageKind {
        PageKind::Species
    }

    fn title(&self, _: &PageContext) -> Result<String> {
        Ok(self.record.latin.clone())
    }

    fn stylesheet<'s>(&self, sheets: &'s Stylesheets) -> &'s str {
        &sheets.species
    }

    fn body(&self, cx: &PageContext) -> Result<Vec<Node>> {
        let heading = format!("{} {}", cx.text(Bundle::Species, "header")?, self.record.name);
        let mut body: Vec<Node> = vec![
            header(&heading, &self.record.latin).into(),
            species_figure(cx, self.record, "image")?.into(),
            el("p").text(&self.record.description).into(),
        ];
        if let Some(sequence) = sequence_details(cx, self.record)? {
            body.push(sequence.into());
        }
        Ok(body)
    }
}

// The expandable sequence section. Only species with a long sequence get one.
fn sequence_details(cx: &PageContext, record: &SpeciesRecord) -> Result<Option<Element>> {
    let resources = cx.resources();
    let long = match long_sequence(&resources.link_path.sequences, &record.code)? {
        Some(long) => long,
        None => {
            log::debug!("`{}`: no long sequence for `{}`", cx.descriptor(), record.code);
            return Ok(None);
        }
    };
    let short = resources.short_sequences.get(&record.code)?;
    Ok(Some(
        el("details")
            .child(el("summary").text(cx.text(Bundle::Species, "sequence")?))
            .child(el("p").class("short_sequence").text(short))
            .child(el("div").class("long_sequence").raw(long)),
    ))
}

/// The placement exercise for one species: a tree awaiting placement and a
/// thumbnail of every candidate.
pub struct PlacementPrompt<'a> {
    record: &'a SpeciesRecord,
}

impl PageVariant for PlacementPrompt<'_> {
    fn kind(&self) -> PageKind {
        PageKind::PlacementPrompt
    }

    fn title(&self, cx: &PageContext) -> Result<String> {
        Ok(cx.text(Bundle::Placement, "title")?.to_owned())
    }

    fn stylesheet<'s>(&self, sheets: &'s Stylesheets) -> &'s str {
        &sheets.placement
    }

    fn body(&self, cx: &PageContext) -> Result<Vec<Node>> {
        let resources = cx.resources();
        let tree = tree_figure(
            cx,
            &question_asset(&self.record.code),
            cx.text(Bundle::Placement, "tree_alt")?,
            Some(cx.text(Bundle::Placement, "tree_caption")?),
        )?;

        let mut candidates = el("div")
            .class("column")
            .child(el("p").text(cx.text(Bundle::Placement, "prompt")?));
        for (i, code) in resources.placement_species.iter().enumerate() {
            let candidate = resources.records.get(code)?;
            let href = match *code == self.record.code {
                true => cx.link_to_page(&PageDescriptor::placement_success(
                    cx.descriptor().locale().clone(),
                    code,
                ))?,
                false => cx.link_to(Role::StartPages, ERROR_PAGE)?,
            };
            let thumbnail = species_figure(cx, candidate, &format!("image{}", i + 1))?;
            candidates = candidates.child(el("a").attr("href", href).child(thumbnail));
        }

        Ok(vec![
            header(
                cx.text(Bundle::Placement, "header")?,
                cx.text(Bundle::Placement, "subheader")?,
            )
            .into(),
            el("div")
                .class("row")
                .child(el("div").class("column").child(tree))
                .child(candidates)
                .into(),
        ])
    }
}

/// The page reached by placing a species correctly.
pub struct PlacementSuccess<'a> {
    record: &'a SpeciesRecord,
}

impl PageVariant for PlacementSuccess<'_> {
    fn kind(&self) -> PageKind {
        PageKind::PlacementSuccess
    }

    fn title(&self, _: &PageContext) -> Result<String> {
        Ok(self.record.latin.clone())
    }

    fn stylesheet<'s>(&self, sheets: &'s Stylesheets) -> &'s str {
        &sheets.success
    }

    fn body(&self, cx: &PageContext) -> Result<Vec<Node>> {
        let locale = cx.descriptor().locale();
        let code = &self.record.code;
        let tree = tree_figure(cx, &answer_asset(code), cx.text(Bundle::Success, "tree_alt")?, None)?;
        let species = button(
            cx.link_to_page(&PageDescriptor::species(locale.clone(), code))?,
            cx.text(Bundle::Success, "button1")?,
        );
        let prompt = button(
            cx.link_to_page(&PageDescriptor::placement_prompt(locale.clone(), code))?,
            cx.text(Bundle::Success, "button2")?,
        );
        let heading = format!("{} {}", cx.text(Bundle::Success, "header")?, self.record.name);
        Ok(vec![
            header(&heading, cx.text(Bundle::Success, "subheader")?).into(),
            el("div")
                .class("row")
                .child(el("div").class("column").child(tree))
                .child(
                    el("div")
                        .class("column")
                        .child(species_figure(cx, self.record, "image")?)
                        .child(species)
                        .child(prompt),
                )
                .into(),
        ])
    }
}

fn header(title: &str, subtitle: &str) -> Element {
    el("div")
        .id("header")
        .child(el("h1").text(title))
        .child(el("h2").child(el("em").text(subtitle)))
}

fn button(href: String, label: &str) -> Element {
    el("a").class("button").attr("href", href).text(label)
}

/// The image of a species, captioned with its license notice.
fn species_figure(cx: &PageContext, record: &SpeciesRecord, id: &str) -> Result<Element> {
    let src = cx.link_to(Role::SpeciesImages, &format!("{}.png", record.code))?;
    let caption = match &record.license_markup {
        Some(markup) => Node::Raw(markup.clone()),
        None => {
            log::debug!("`{}`: no license markup for `{}`", cx.descriptor(), record.code);
            Node::Text(MISSING_CAPTION.to_owned())
        }
    };
    Ok(el("div").id(id).child(
        el("figure")
            .id("habitus")
            .child(
                el("img")
                    .attr("src", src)
                    .attr("alt", record.license_text.as_str()),
            )
            .child(el("figcaption").child(caption)),
    ))
}

/// A placement tree transcluded inline.
fn tree_figure(cx: &PageContext, asset: &str, label: &str, caption: Option<&str>) -> Result<Element> {
    let mut figure = el("figure")
        .id("tree")
        .attr("aria-label", label)
        .raw(cx.transclude(Role::PlacementImages, asset)?);
    if let Some(caption) = caption {
        figure = figure.child(el("figcaption").text(caption));
    }
    Ok(el("div").id("image").child(figure))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::html::find_all;
    use crate::site::Site;
    use crate::testing::Fixture;

    fn body(site: &Site, descriptor: &PageDescriptor) -> Result<Vec<Node>> {
        let cx = PageContext::new(site, descriptor)?;
        for_page(&cx)?.body(&cx)
    }

    fn captions(nodes: &[Node]) -> Vec<String> {
        find_all(nodes, "figcaption")
            .into_iter()
            .map(|caption| match caption.children.first() {
                Some(Node::Text(text)) | Some(Node::Raw(text)) => text.clone(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_species_missing_license_markup() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let nodes = body(&site, &PageDescriptor::species(fixture.en(), "ROBIN"))?;
        assert_eq!(vec![MISSING_CAPTION.to_owned()], captions(&nodes));

        let img = find_all(&nodes, "img")[0];
        assert_eq!(Some("../../../assets/img/birds/ROBIN.png"), img.get_attr("src"));
        assert_eq!(Some("Photo: A. Person, CC BY"), img.get_attr("alt"));
        Ok(())
    }

    #[test]
    fn test_species_title_and_sequence() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let robin = PageDescriptor::species(fixture.en(), "ROBIN");
        let cx = PageContext::new(&site, &robin)?;
        let variant = for_page(&cx)?;
        assert_eq!("Erithacus rubecula", variant.title(&cx)?);

        let nodes = variant.body(&cx)?;
        let details = find_all(&nodes, "details");
        assert_eq!(1, details.len());
        let long = find_all(&nodes, "div")
            .into_iter()
            .find(|div| div.get_attr("class") == Some("long_sequence"))
            .expect("a long sequence section");
        assert_eq!(vec![Node::Raw("ACGT".to_owned())], long.children);
        Ok(())
    }

    #[test]
    fn test_species_without_long_sequence() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let nodes = body(&site, &PageDescriptor::species(fixture.en(), "WREN"))?;
        assert!(find_all(&nodes, "details").is_empty());
        assert_eq!(
            vec!["<a href=\"https://example.org/b\">B. Person</a>, CC BY-SA".to_owned()],
            captions(&nodes)
        );
        Ok(())
    }

    #[test]
    fn test_unknown_species() {
        let fixture = Fixture::new();
        let site = fixture.site();
        let result = body(&site, &PageDescriptor::species(fixture.en(), "DODO"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_placement_requires_placement_species() {
        let fixture = Fixture::new();
        let site = fixture.site();
        for descriptor in vec![
            PageDescriptor::placement_prompt(fixture.en(), "OWL"),
            PageDescriptor::placement_success(fixture.en(), "OWL"),
        ] {
            let result = body(&site, &descriptor);
            assert!(matches!(result, Err(Error::InvalidState { ref code }) if code == "OWL"));
        }
    }

    #[test]
    fn test_placement_thumbnails() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let nodes = body(&site, &PageDescriptor::placement_prompt(fixture.en(), "ROBIN"))?;

        let thumbnails: Vec<(&str, &str)> = find_all(&nodes, "a")
            .into_iter()
            .filter_map(|a| match a.children.first() {
                Some(Node::Element(div)) => Some((div.get_attr("id")?, a.get_attr("href")?)),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![("image1", "ROBIN_success.html"), ("image2", "../error.html")],
            thumbnails
        );
        Ok(())
    }

    #[test]
    fn test_success_links_back() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let nodes = body(&site, &PageDescriptor::placement_success(fixture.gr(), "WREN"))?;
        let buttons: Vec<&str> = find_all(&nodes, "a")
            .into_iter()
            .filter(|a| a.get_attr("class") == Some("button"))
            .filter_map(|a| a.get_attr("href"))
            .collect();
        assert_eq!(vec!["../birds/WREN.html", "WREN_placement.html"], buttons);
        Ok(())
    }

    #[test]
    fn test_title_buttons() -> Result<()> {
        let fixture = Fixture::new();
        let site = fixture.site();
        let nodes = body(&site, &PageDescriptor::title(fixture.en()))?;
        let buttons: Vec<&str> = find_all(&nodes, "a")
            .into_iter()
            .filter(|a| a.get_attr("class") == Some("button"))
            .filter_map(|a| a.get_attr("href"))
            .collect();
        assert_eq!(vec!["info.html", "exercise.html"], buttons);
        Ok(())
    }
}
