//! A two-locale bird site on disk, shared by the unit tests and the end-to-end
//! tests. Only the standard library is used here so the same file can be
//! compiled into either.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const PROJECT: &str = "\
stylesheets:
  success: placement.css
locales:
  - locale: en
    species_pages: site/en/birds
    placement_pages: site/en/placement
    start_pages: site/en
    species_images: assets/img/birds
    placement_images: assets/img/placement
    stylesheets: assets/css
    sequences: data/en/sequences
    texts: data/en/texts
    records: data/en/birds.csv
  - locale: gr
    species_pages: site/gr/birds
    placement_pages: site/gr/placement
    start_pages: site/gr
    species_images: assets/img/birds
    placement_images: assets/img/placement
    stylesheets: assets/css
    sequences: data/gr/sequences
    texts: data/gr/texts
    records: data/gr/birds.csv
    species_names: data/gr/names.txt
";

const HEADER: &str = "CODE;Name;Latin;text;license notice for plain text ;license notice HTML (https://lizenzhinweisgenerator.de/)";

const EN_RECORDS: &[&str] = &[
    "ROBIN;Robin;Erithacus rubecula;A small thrush with an orange breast.;Photo: A. Person, CC BY;",
    "WREN;Wren;Troglodytes troglodytes;Tiny and very loud.;Photo: B. Person;<a href=\"https://example.org/b\">B. Person</a>, CC BY-SA",
    "OWL;Barn owl;Tyto alba;Hunts at night.;Photo: C. Person;<a href=\"https://example.org/c\">C. Person</a>",
];

const GR_RECORDS: &[&str] = &[
    "ROBIN;Κοκκινολαίμης;Erithacus rubecula;Μικρό πουλί.;Φωτογραφία: A. Person;",
    "WREN;Τρυποφράχτης;Troglodytes troglodytes;Μικρό και δυνατό.;Φωτογραφία: B. Person;<a href=\"https://example.org/b\">B. Person</a>",
];

const EN_TEXTS: &[(&str, &str)] = &[
    (
        "basics.yml",
        "changelang:\n  FILL_IN: \"Change language:\"\nback:\n  FILL_IN: Back\nen:\n  FILL_IN: English\ngr:\n  FILL_IN: Greek\n",
    ),
    (
        "title.yml",
        "title: Diversity of birds worldwide.\nheader: Phylogeny of the birds of the world\nsubheader: How the birds of the world relate to each other.\ntree_alt: Phylogeny of birds with outgroup.\ntree_caption: A tree full of birds.\ntext: Click on a bird to find out more.\nbutton1: About the project\nbutton2: Place a bird\n",
    ),
    ("birdpage.yml", "header:\n  FILL_IN: \"Meet the\"\nsequence:\n  FILL_IN: Show the DNA sequence\n"),
    (
        "placement.yml",
        "title: Phylogenetic placement for a newly discovered bird.\nheader: Phylogenetic placement\nsubheader: Which bird could be placed here on the tree?\ntree_alt: Phylogenetic tree for placement.\ntree_caption: Our wet lab sent us this data.\nprompt: Which bird could it be that fits into the tree?\n",
    ),
    (
        "success.yml",
        "header: \"Successfully placed:\"\nsubheader: You are a great researcher.\ntree_alt: The solved placement.\nbutton1: Learn more about this bird\nbutton2: Back to the placement\n",
    ),
];

const GR_TEXTS: &[(&str, &str)] = &[
    (
        "basics.yml",
        "changelang: \"Αλλαγή γλώσσας:\"\nback: Πίσω\nen: Αγγλικά\ngr: Ελληνικά\n",
    ),
    (
        "title.yml",
        "title: Ποικιλότητα πουλιών.\nheader: Φυλογένεση\nsubheader: Πώς σχετίζονται τα πουλιά.\ntree_alt: Φυλογένεση πουλιών.\ntree_caption: Ένα δέντρο.\ntext: Κάντε κλικ.\nbutton1: Σχετικά\nbutton2: Παιχνίδι\n",
    ),
    ("birdpage.yml", "header: Γνωρίστε τον\nsequence: Αλληλουχία DNA\n"),
    (
        "placement.yml",
        "title: Τοποθέτηση.\nheader: Τοποθέτηση\nsubheader: Ποιο πουλί;\ntree_alt: Δέντρο.\ntree_caption: Δεδομένα.\nprompt: Ποιο πουλί ταιριάζει;\n",
    ),
    (
        "success.yml",
        "header: \"Επιτυχία:\"\nsubheader: Μπράβο.\ntree_alt: Λύση.\nbutton1: Μάθετε περισσότερα\nbutton2: Πίσω στην τοποθέτηση\n",
    ),
];

pub const TREE_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">
  <a xlink:href=\"../birds/ROBIN.png\"><image href=\"../birds/ROBIN.png\" width=\"40\"/></a>
  <image href=\"../birds/WREN.png\" width=\"40\"/>
  <a href=\"https://example.org/tree\"><text>source</text></a>
</svg>";

pub const QUESTION_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">
  <image href=\"../birds/OWL.png\"/>
  <use href=\"tree.svg#root\"/>
</svg>";

pub const ANSWER_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">
  <image  id=\"answer\" href=\"./../birds/ROBIN.png\" />
</svg>";

pub const ROBIN_LONG_SEQUENCE: &str = "<!DOCTYPE html>
<html>
<head><title>ROBIN</title></head>
<body>
ACGT
</body>
</html>
";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn table(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

/// Writes the project file and every input of the two-locale site into
/// `root`.
pub fn write_site(root: &Path) {
    write(root, "birdsite.yaml", PROJECT);
    write(root, "data/en/birds.csv", &table(EN_RECORDS));
    write(root, "data/gr/birds.csv", &table(GR_RECORDS));
    write(root, "data/gr/names.txt", "WREN\n\nROBIN\n");
    for (name, contents) in EN_TEXTS {
        write(root, &format!("data/en/texts/{}", name), contents);
    }
    for (name, contents) in GR_TEXTS {
        write(root, &format!("data/gr/texts/{}", name), contents);
    }
    for locale in &["en", "gr"] {
        write(
            root,
            &format!("data/{}/sequences/list.html", locale),
            "<dl>\n<dt>ROBIN</dt>ACGTTGCA\n<dt>WREN</dt>TTGACCA\n</dl>\n",
        );
        write(root, &format!("data/{}/sequences/ROBIN.html", locale), ROBIN_LONG_SEQUENCE);
        write(root, &format!("data/{}/sequences/styles.css", locale), "dl { }\n");
        for page in &["error.html", "info.html", "exercise.html"] {
            write(root, &format!("site/{}/{}", locale, page), "<html></html>\n");
        }
    }
    write(root, "assets/css/two_columns.css", ".column { }\n");
    write(root, "assets/css/placement.css", ".button { }\n");
    for code in &["ROBIN", "WREN", "OWL"] {
        write(root, &format!("assets/img/birds/{}.png", code), "png");
    }
    write(root, "assets/img/placement/tree.svg", TREE_SVG);
    for code in &["ROBIN", "WREN"] {
        write(
            root,
            &format!("assets/img/placement/tree_{}_question.svg", code),
            QUESTION_SVG,
        );
        write(
            root,
            &format!("assets/img/placement/tree_{}_answer.svg", code),
            ANSWER_SVG,
        );
    }
}

/// Narrows the `gr` half of the site written by [`write_site`]: its placement
/// exercise gets a directory of its own holding only WREN, and only the WREN
/// species page is built.
pub fn narrow_gr(root: &Path) {
    let project = fs::read_to_string(root.join("birdsite.yaml")).unwrap();
    let project = project.replacen(
        "placement_images: assets/img/placement\n    stylesheets: assets/css\n    sequences: data/gr",
        "placement_images: assets/img/gr_placement\n    stylesheets: assets/css\n    sequences: data/gr",
        1,
    );
    write(root, "birdsite.yaml", &project);
    write(root, "assets/img/gr_placement/tree.svg", TREE_SVG);
    write(root, "assets/img/gr_placement/tree_WREN_question.svg", QUESTION_SVG);
    write(root, "assets/img/gr_placement/tree_WREN_answer.svg", ANSWER_SVG);
    write(root, "data/gr/names.txt", "WREN\n");
}
