/// Interpretation of the next body byte.
///
/// The token stream carries no tags, so encoder and decoder each track one of
/// these and must move through the same transitions for every byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// The next body byte is a literal copied to the output.
    #[default]
    ExpectLiteral,
    /// The last two literals were identical; the next body byte is the count
    /// of additional repeats.
    ExpectRunCount,
}

impl ScanState {
    pub fn is_pair_open(self) -> bool {
        self == ScanState::ExpectRunCount
    }

    /// State reached after a literal, given whether it completed a pair.
    pub fn after_literal(pair: bool) -> Self {
        if pair {
            ScanState::ExpectRunCount
        } else {
            ScanState::ExpectLiteral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_expecting_literal() {
        assert_eq!(ScanState::default(), ScanState::ExpectLiteral);
        assert!(!ScanState::default().is_pair_open());
    }

    #[test]
    fn literal_transition() {
        assert_eq!(ScanState::after_literal(true), ScanState::ExpectRunCount);
        assert_eq!(ScanState::after_literal(false), ScanState::ExpectLiteral);
        assert!(ScanState::after_literal(true).is_pair_open());
    }
}
