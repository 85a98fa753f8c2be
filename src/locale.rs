//! Defines the [`Locale`] type, which identifies one language edition of the
//! site.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A two-letter language identifier such as `en` or `gr`. Locales are always
/// stored lower-cased because they double as directory names in the output
/// tree (e.g., `site/en/birds/ROBIN.html`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Returns the lower-cased identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Locale(s.to_ascii_lowercase()))
        } else {
            Err(Error::InvalidLocale(s.to_owned()))
        }
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Locale, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse::<Locale>()
            .map_err(|e| D::Error::custom(format!("{}", e)))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
