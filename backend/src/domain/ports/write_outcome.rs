//! Result of a single-document write addressed by identifier.

/// Whether the filter of an update or delete matched a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A document matched the identifier; the write was applied (possibly as
    /// a no-op, e.g. adding a friend that is already present).
    Matched,
    /// No document carries the identifier.
    NoMatch,
}

impl WriteOutcome {
    /// Build an outcome from a matched-document count.
    #[must_use]
    pub fn from_count(matched: u64) -> Self {
        if matched == 0 {
            Self::NoMatch
        } else {
            Self::Matched
        }
    }

    /// True when a document matched.
    #[must_use]
    pub fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, WriteOutcome::NoMatch)]
    #[case(1, WriteOutcome::Matched)]
    #[case(3, WriteOutcome::Matched)]
    fn from_count_maps_zero_to_no_match(#[case] count: u64, #[case] expected: WriteOutcome) {
        assert_eq!(WriteOutcome::from_count(count), expected);
    }
}
