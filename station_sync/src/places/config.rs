//! Selection configuration: parsing and normalization.
//!
//! A [`PlaceSelection`] is the TOML-backed structure naming which stations
//! to record snapshots for, in three option groups:
//! - `domains` — short domain codes, expanded to every place under them
//! - `cities` — city ids, expanded to their places
//! - `places` — explicit place ids
//!
//! Normalization trims and lowercases domain codes and de-duplicates all
//! three groups while preserving order. Whether an id actually exists is
//! *not* checked here; stale ids are tolerated at resolution time, not at
//! load time. An id group may be empty or absent entirely; a code that is
//! empty after trimming is a configuration error.

use std::collections::HashSet;
use std::mem;

use anyhow::{Context, bail};
use serde::Deserialize;
use toml::from_str;

/// Which places to record, in up to three option groups.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlaceSelection {
    /// Short domain codes (e.g. "de"), normalized lowercase.
    #[serde(default)]
    pub domains: Vec<String>,
    /// City ids.
    #[serde(default)]
    pub cities: Vec<i32>,
    /// Explicit place ids.
    #[serde(default)]
    pub places: Vec<i32>,
}

impl PlaceSelection {
    /// True if no group names anything, i.e. "record everything".
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.cities.is_empty() && self.places.is_empty()
    }
}

/// Normalize a selection in-place.
///
/// - Trim + lowercase domain codes; empty codes after trimming are an error
/// - De-duplicate each group, preserving the first occurrence order
pub fn normalize_selection(sel: &mut PlaceSelection) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    let mut domains = Vec::with_capacity(sel.domains.len());
    for raw in mem::take(&mut sel.domains) {
        let code = raw.trim().to_lowercase();
        if code.is_empty() {
            bail!("domain code cannot be empty after trimming");
        }
        if seen.insert(code.clone()) {
            domains.push(code);
        }
    }
    sel.domains = domains;

    sel.cities = dedupe_ids(mem::take(&mut sel.cities));
    sel.places = dedupe_ids(mem::take(&mut sel.places));
    Ok(())
}

fn dedupe_ids(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Parse and normalize a selection from a TOML string.
pub fn load_selection_str(toml_str: &str) -> anyhow::Result<PlaceSelection> {
    let mut sel: PlaceSelection = from_str(toml_str).context("failed to parse selection TOML")?;
    normalize_selection(&mut sel).context("normalize_selection failed")?;
    Ok(sel)
}

/// Read a selection TOML file from disk, parse, and normalize it.
pub fn load_selection_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<PlaceSelection> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read selection file {}", path.as_ref().display()))?;
    load_selection_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_codes_and_dedupes() {
        let mut sel = PlaceSelection {
            domains: vec![" DE ".into(), "de".into(), "at".into()],
            cities: vec![14, 14, 22],
            places: vec![5, 5, 7],
        };
        normalize_selection(&mut sel).unwrap();

        assert_eq!(sel.domains, vec!["de", "at"]);
        assert_eq!(sel.cities, vec![14, 22]);
        assert_eq!(sel.places, vec![5, 7]);
    }

    #[test]
    fn empty_code_after_trimming_errors() {
        let mut sel = PlaceSelection {
            domains: vec!["   ".into()],
            ..Default::default()
        };
        let err = normalize_selection(&mut sel).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn all_groups_optional_in_toml() {
        let sel = load_selection_str("cities = [14]").unwrap();
        assert_eq!(sel.cities, vec![14]);
        assert!(sel.domains.is_empty());
        assert!(sel.places.is_empty());

        assert!(load_selection_str("").unwrap().is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(load_selection_str("stations = [1]").is_err());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn domains_lowercased_and_unique(
            names in proptest::collection::vec("[a-zA-Z]{1,6}", 1..6),
        ) {
            let mut sel = PlaceSelection {
                domains: names.iter().enumerate()
                    .map(|(i, n)| if i % 2 == 0 { n.to_uppercase() } else { format!("  {n} ") })
                    .collect(),
                ..Default::default()
            };
            normalize_selection(&mut sel).unwrap();

            // all codes lowercase and trimmed
            prop_assert!(sel.domains.iter().all(|c| c.chars().all(|ch| !ch.is_uppercase())));
            prop_assert!(sel.domains.iter().all(|c| c.trim() == c));
            // no duplicates survive
            let unique: std::collections::HashSet<_> = sel.domains.iter().collect();
            prop_assert_eq!(unique.len(), sel.domains.len());
        }
    }
}
