//! Keyword statistics over a raw journal window

use crate::classify::{contains_any, OPERATION_RULES};
use crate::types::{Operation, Statistics};

/// Count keyword occurrences in plain-text journal output.
///
/// Works on any line format. Each line bumps every counter whose keywords it
/// contains. `total` counts `\n`-separated segments, blank ones included.
pub fn aggregate(raw: &str) -> Statistics {
    let mut stats = Statistics::default();

    for line in raw.split('\n') {
        stats.total += 1;

        for (keywords, operation) in OPERATION_RULES {
            if !contains_any(line, keywords) {
                continue;
            }
            match operation {
                Operation::Push => stats.pushes += 1,
                Operation::Pull => stats.pulls += 1,
                Operation::Merge => stats.merges += 1,
                Operation::Conflict => stats.conflicts += 1,
                Operation::Unknown => {}
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn test_counters_are_not_exclusive() {
        let stats = aggregate("[repo] pull then push\n");
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.pulls, 1);
        assert_eq!(stats.merges, 0);
        assert_eq!(stats.conflicts, 0);
    }

    #[test]
    fn test_total_counts_raw_lines() {
        let raw = "Oct 19 10:00:01 host sync[1]: [a] Pushing\n\nOct 19 10:00:02 host sync[1]: [b] Merged\n";
        let stats = aggregate(raw);
        // three lines plus the empty segment after the trailing newline
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.merges, 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            aggregate(""),
            Statistics {
                total: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_merge_conflict_line_counts_both() {
        let stats = aggregate("[repoB] Conflict detected, merge failed");
        assert_eq!(stats.merges, 1);
        assert_eq!(stats.conflicts, 1);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_total_differs_from_event_count() {
        let raw = "{\"MESSAGE\":\"[a] push\",\"__REALTIME_TIMESTAMP\":\"1\"}\nnot json\n\n";
        assert_eq!(classify(raw).len(), 1);
        assert_eq!(aggregate(raw).total, 4);
    }
}
