//! Confidence scoring strategies, one per detector family.
//!
//! The two formulas differ on purpose: the AST family weighs individual
//! evidence items more heavily because the parser produces precise matches,
//! while the regex family weighs matching files more heavily to offset its
//! noisier per-line evidence. Do not unify them.

/// Score for the AST-based JS/TS family.
///
/// `min(patterns*15, 60) + min(files*10, 30) + 10 if any pattern`, capped
/// at 100.
pub fn ast_family_confidence(pattern_count: usize, file_count: usize) -> u8 {
    let score = (pattern_count * 15).min(60)
        + (file_count * 10).min(30)
        + if pattern_count > 0 { 10 } else { 0 };

    score.min(100) as u8
}

/// Score for the regex-based Swift/Kotlin families.
///
/// `min(patterns*10, 60) + min(files*15, 30) + 10 if any pattern`, capped
/// at 100.
pub fn regex_family_confidence(pattern_count: usize, file_count: usize) -> u8 {
    let score = (pattern_count * 10).min(60)
        + (file_count * 15).min(30)
        + if pattern_count > 0 { 10 } else { 0 };

    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ast_formula_matches_expected_values() {
        assert_eq!(ast_family_confidence(0, 0), 0);
        assert_eq!(ast_family_confidence(1, 1), 15 + 10 + 10);
        assert_eq!(ast_family_confidence(4, 2), 60 + 20 + 10);
        assert_eq!(ast_family_confidence(100, 100), 100);
    }

    #[test]
    fn regex_formula_matches_expected_values() {
        assert_eq!(regex_family_confidence(0, 0), 0);
        assert_eq!(regex_family_confidence(1, 1), 10 + 15 + 10);
        assert_eq!(regex_family_confidence(6, 2), 60 + 30 + 10);
        assert_eq!(regex_family_confidence(50, 10), 100);
    }

    #[test]
    fn confidence_stays_within_bounds() {
        for patterns in 0..50 {
            for files in 0..20 {
                assert!(ast_family_confidence(patterns, files) <= 100);
                assert!(regex_family_confidence(patterns, files) <= 100);
            }
        }
    }
}
