//! Free-text answer canonicalization and checking.

use std::collections::BTreeSet;

/// Canonicalize a raw answer.
///
/// Lower-cases, removes every space and hyphen, then spells out the `1st`
/// ordinal as `first`. The steps run in that order, so `"1 st"` becomes
/// `"first"` too.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .replace(' ', "")
        .replace('-', "")
        .replace("1st", "first")
}

/// Exact membership of an already-normalized answer in an accepted set.
#[must_use]
pub fn is_correct(normalized: &str, accepted: &BTreeSet<String>) -> bool {
    accepted.contains(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_hyphens_and_case_are_ignored() {
        let expected = normalize("JohnSmith");
        assert_eq!(normalize("John Smith"), expected);
        assert_eq!(normalize("john-smith"), expected);
        assert_eq!(expected, "johnsmith");
    }

    #[test]
    fn first_ordinal_is_spelled_out() {
        assert_eq!(normalize("1st Detective"), normalize("first detective"));
        assert_eq!(normalize("1 st floor"), "firstfloor");
    }

    #[test]
    fn tabs_are_not_stripped() {
        assert_eq!(normalize("a\tb"), "a\tb");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "John Smith",
            "1st Floor",
            "11stst",
            "1-st 1 st 1st",
            "  Ünïcode  Ärger ",
            "first-1st--FIRST",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn accepted_set_membership_is_exact() {
        let accepted: BTreeSet<String> = ["firstfloor".to_string()].into_iter().collect();
        assert!(is_correct(&normalize("1st Floor"), &accepted));
        assert!(!is_correct(&normalize("first floors"), &accepted));
        assert!(!is_correct("1st Floor", &accepted));
    }
}
