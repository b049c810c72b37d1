// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input source table.
//!
//! Maps the human-readable input names shown to users onto the codes the
//! receiver uses after `SI`. A separate media-mode subset lists the inputs
//! that can report now-playing text through `NSE`.

use crate::error::SourceError;

/// Regular inputs as `(name, wire code)` pairs, in lookup order.
pub const NORMAL_INPUTS: &[(&str, &str)] = &[
    ("PHONO", "Phono"),
    ("CD", "CD"),
    ("TUNER", "Tuner"),
    ("DVD", "DVD"),
    ("VDP", "VDP"),
    ("TV", "TV"),
    ("Satelite / Cable", "DBS/SAT"),
    ("VCR 1", "VCR-1"),
    ("VCR 2", "VCR-2"),
    ("VCR 3", "VCR-3"),
    ("Video Aux", "V.AUX"),
    ("CD-R/Tape 1", "CDR/TAPE1"),
    ("MD/Tape 2", "MD/TAPE2"),
    ("USB", "USB"),
    ("IPOD", "IPOD"),
];

/// Inputs that support now-playing retrieval, as `(name, wire code)` pairs.
pub const MEDIA_MODE_INPUTS: &[(&str, &str)] = &[("Tuner", "TUNER")];

/// Bidirectional lookup between input names and wire codes.
///
/// Names are unique. Codes need not be: reverse lookup returns the first
/// entry in table order, regular inputs before media modes.
///
/// # Examples
///
/// ```
/// use avrctl_lib::types::SourceTable;
///
/// let table = SourceTable::default();
/// assert_eq!(table.lookup_code_by_name("Video Aux").unwrap(), "V.AUX");
/// assert_eq!(table.lookup_name_by_code("TUNER"), Some("Tuner"));
/// assert_eq!(table.lookup_name_by_code("XYZ"), None);
/// assert!(table.is_media_mode_code("TUNER"));
/// assert!(!table.is_media_mode_code("Tuner"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTable {
    normal: &'static [(&'static str, &'static str)],
    media_modes: &'static [(&'static str, &'static str)],
}

impl Default for SourceTable {
    fn default() -> Self {
        Self::new(NORMAL_INPUTS, MEDIA_MODE_INPUTS)
    }
}

impl SourceTable {
    /// Creates a table from regular and media-mode entries.
    #[must_use]
    pub const fn new(
        normal: &'static [(&'static str, &'static str)],
        media_modes: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            normal,
            media_modes,
        }
    }

    /// Iterates every `(name, code)` pair in lookup order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.normal.iter().chain(self.media_modes).copied()
    }

    /// Returns the wire code for an input name.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if no input has this name.
    pub fn lookup_code_by_name(&self, name: &str) -> Result<&'static str, SourceError> {
        self.entries()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| code)
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    /// Returns the first input name whose code equals `code`.
    #[must_use]
    pub fn lookup_name_by_code(&self, code: &str) -> Option<&'static str> {
        self.entries().find(|(_, c)| *c == code).map(|(name, _)| name)
    }

    /// Returns `true` if `code` belongs to the media-mode subset.
    #[must_use]
    pub fn is_media_mode_code(&self, code: &str) -> bool {
        self.media_modes.iter().any(|(_, c)| *c == code)
    }

    /// Returns all input names in lexicographic order.
    #[must_use]
    pub fn all_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_code_by_name() {
        let table = SourceTable::default();
        assert_eq!(table.lookup_code_by_name("PHONO").unwrap(), "Phono");
        assert_eq!(table.lookup_code_by_name("Satelite / Cable").unwrap(), "DBS/SAT");
        assert_eq!(table.lookup_code_by_name("Tuner").unwrap(), "TUNER");
        assert_eq!(table.lookup_code_by_name("TUNER").unwrap(), "Tuner");
    }

    #[test]
    fn lookup_code_by_unknown_name() {
        let table = SourceTable::default();
        assert_eq!(
            table.lookup_code_by_name("NoSuchInput"),
            Err(SourceError::NotFound("NoSuchInput".to_string()))
        );
        // Names are case sensitive
        assert!(table.lookup_code_by_name("phono").is_err());
    }

    #[test]
    fn lookup_name_by_code_is_total() {
        let table = SourceTable::default();
        assert_eq!(table.lookup_name_by_code("DBS/SAT"), Some("Satelite / Cable"));
        assert_eq!(table.lookup_name_by_code("XYZ"), None);
        assert_eq!(table.lookup_name_by_code(""), None);
    }

    #[test]
    fn every_name_round_trips_through_its_code() {
        let table = SourceTable::default();
        for (name, code) in table.entries() {
            assert_eq!(table.lookup_code_by_name(name).unwrap(), code);
            assert_eq!(table.lookup_name_by_code(code), Some(name));
        }
    }

    #[test]
    fn duplicate_codes_resolve_to_first_entry() {
        static NORMAL: &[(&str, &str)] = &[("Radio", "TUNER"), ("CD", "CD")];
        static MEDIA: &[(&str, &str)] = &[("Tuner", "TUNER")];
        let table = SourceTable::new(NORMAL, MEDIA);
        assert_eq!(table.lookup_name_by_code("TUNER"), Some("Radio"));
        assert!(table.is_media_mode_code("TUNER"));
    }

    #[test]
    fn media_mode_membership() {
        let table = SourceTable::default();
        assert!(table.is_media_mode_code("TUNER"));
        assert!(!table.is_media_mode_code("CD"));
        assert!(!table.is_media_mode_code(""));
    }

    #[test]
    fn all_names_sorted() {
        let names = SourceTable::default().all_names();
        assert_eq!(names.len(), 16);
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(names.first(), Some(&"CD"));
        assert_eq!(names.last(), Some(&"Video Aux"));
        assert!(names.contains(&"Tuner"));
        assert!(names.contains(&"TUNER"));
    }
}
