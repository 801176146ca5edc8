// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material catalog built from the trailing `MATERIALS` section.

use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Raw material records keyed by item code
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaterialCatalog {
    records: FxHashMap<String, Arc<[String]>>,
}

impl MaterialCatalog {
    /// Group material lines into records
    ///
    /// `lines` are the lines after the `MATERIALS` marker. A record runs from
    /// one `ITEM-CODE` line up to the next one; lines before the first code
    /// are ignored. A repeated code replaces the earlier record.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = FxHashMap::default();
        let mut current: Option<(String, Vec<String>)> = None;

        for raw in lines {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut tokens = trimmed.split_whitespace();
            let is_code = tokens
                .next()
                .is_some_and(|key| key.eq_ignore_ascii_case("ITEM-CODE"));

            if is_code {
                if let Some((code, lines)) = current.take() {
                    records.insert(code, Arc::from(lines));
                }
                let code = tokens.next().unwrap_or_default().to_string();
                tracing::trace!(%code, "Material record");
                current = Some((code, vec![raw.to_string()]));
            } else if let Some((_, lines)) = current.as_mut() {
                lines.push(raw.to_string());
            }
        }
        if let Some((code, lines)) = current {
            records.insert(code, Arc::from(lines));
        }

        Self { records }
    }

    /// Lines recorded for `code`.
    #[inline]
    pub fn get(&self, code: &str) -> Option<&Arc<[String]>> {
        self.records.get(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_records_by_code() {
        let text = "\
ITEM-CODE P-100
    DESCRIPTION PIPE SMLS ASTM A106-B
ITEM-CODE F-200

    DESCRIPTION FLANGE WN RF
    MATERIAL-IDENTIFIER 7";
        let catalog = MaterialCatalog::from_lines(text.lines());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("P-100").map(|l| l.len()), Some(2));
        let flange = catalog.get("F-200").expect("flange record");
        assert_eq!(flange.len(), 3);
        assert_eq!(flange[0], "ITEM-CODE F-200");
        assert!(catalog.get("X-999").is_none());
    }

    #[test]
    fn lines_before_first_code_are_dropped() {
        let catalog = MaterialCatalog::from_lines(["    DESCRIPTION ORPHAN", "ITEM-CODE A"]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("A").map(|l| l.len()), Some(1));
    }

    #[test]
    fn repeated_code_keeps_last_record() {
        let catalog = MaterialCatalog::from_lines([
            "ITEM-CODE A",
            "    DESCRIPTION FIRST",
            "ITEM-CODE A",
            "    DESCRIPTION SECOND",
        ]);
        let record = catalog.get("A").expect("record");
        assert_eq!(record[1], "    DESCRIPTION SECOND");
    }
}
