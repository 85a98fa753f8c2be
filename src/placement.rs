//! Derives the set of species used in the placement exercise from the
//! placement assets on disk, and names those assets.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

const TREE_PREFIX: &str = "tree_";
const QUESTION_SUFFIX: &str = "_question.svg";
const ANSWER_SUFFIX: &str = "_answer.svg";

/// The tree of all species shown on the start page.
pub const GLOBAL_TREE: &str = "tree.svg";

/// The tree awaiting placement of `code`.
pub fn question_asset(code: &str) -> String {
    format!("{}{}{}", TREE_PREFIX, code, QUESTION_SUFFIX)
}

/// The tree with `code` placed.
pub fn answer_asset(code: &str) -> String {
    format!("{}{}{}", TREE_PREFIX, code, ANSWER_SUFFIX)
}

/// Lists `dir` (not recursively) and returns the code of every
/// `tree_<code>_question.svg` found there.
pub fn placement_species(dir: &Path) -> Result<BTreeSet<String>> {
    let mut codes = BTreeSet::new();
    if !dir.is_dir() {
        log::warn!("No placement assets at `{}`", dir.display());
        return Ok(codes);
    }
    for result in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = result.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_owned();
            Error::io(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if let Some(code) = file_name
            .strip_prefix(TREE_PREFIX)
            .and_then(|rest| rest.strip_suffix(QUESTION_SUFFIX))
        {
            if !code.is_empty() {
                codes.insert(code.to_owned());
            }
        }
    }
    Ok(codes)
}
