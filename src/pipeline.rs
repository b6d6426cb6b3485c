// 🧮 Filter Pipeline
// Fixed stage order: history exclusion → sequential exclusion → attribute filters.
// Every stage is a stable filter; surviving codes keep their pool order.

use crate::code::Code;
use crate::error::{Error, Result};
use crate::filter::FilterCriteria;
use crate::history::History;
use serde::Serialize;
use tracing::{debug, warn};

// ============================================================================
// FILTER REPORT
// ============================================================================

/// Stage counts plus the surviving candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Size of the loaded pool
    pub pool_total: usize,

    /// Left after removing codes found in history
    pub after_history: usize,

    /// Left after removing sequential-tainted codes
    pub after_sequential: usize,

    /// Left after the attribute filters (0 when that stage was skipped)
    pub after_attributes: usize,

    /// Surviving codes, in pool order
    pub candidates: Vec<Code>,
}

impl FilterReport {
    /// Candidates, or the "no candidates" condition for the stage that emptied them
    pub fn ensure_candidates(&self) -> Result<&[Code]> {
        if self.after_sequential == 0 {
            Err(Error::EmptyAfterHistoryOrSequentialFilter)
        } else if self.candidates.is_empty() {
            Err(Error::EmptyAfterAttributeFilter)
        } else {
            Ok(&self.candidates)
        }
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run all three stages over the pool. If stages 1+2 leave nothing,
/// the attribute stage is skipped.
pub fn filter_pool(pool: &[Code], history: &History, criteria: &FilterCriteria) -> FilterReport {
    let unused: Vec<&Code> = pool.iter().filter(|code| !history.contains(code)).collect();
    let after_history = unused.len();

    let non_sequential: Vec<&Code> = unused
        .into_iter()
        .filter(|code| !code.is_sequential_tainted())
        .collect();
    let after_sequential = non_sequential.len();

    debug!(
        pool_total = pool.len(),
        after_history, after_sequential, "history and sequential exclusion done"
    );

    if non_sequential.is_empty() {
        warn!("No codes left after history and sequential filtering");
        return FilterReport {
            pool_total: pool.len(),
            after_history,
            after_sequential,
            after_attributes: 0,
            candidates: Vec::new(),
        };
    }

    let candidates: Vec<Code> = non_sequential
        .into_iter()
        .filter(|code| criteria.matches(code))
        .cloned()
        .collect();

    if candidates.is_empty() {
        warn!("No codes left after attribute filtering");
    }

    FilterReport {
        pool_total: pool.len(),
        after_history,
        after_sequential,
        after_attributes: candidates.len(),
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Magnitude, Parity};

    fn codes(values: &[&str]) -> Vec<Code> {
        values.iter().map(|v| Code::parse(v).unwrap()).collect()
    }

    #[test]
    fn test_sequential_exclusion_scenario() {
        let pool = codes(&["00012", "00123", "00135", "04321"]);
        let report = filter_pool(&pool, &History::default(), &FilterCriteria::default());

        assert_eq!(report.pool_total, 4);
        assert_eq!(report.after_history, 4);
        assert_eq!(report.after_sequential, 1);
        assert_eq!(report.candidates, codes(&["00135"]));
    }

    #[test]
    fn test_defaults_pass_both_sides_of_the_boundary() {
        let pool = codes(&["50000", "49999"]);
        let report = filter_pool(&pool, &History::default(), &FilterCriteria::default());
        assert_eq!(report.candidates, pool);
    }

    #[test]
    fn test_history_exclusion_by_exact_match() {
        let pool = codes(&["13579", "24680", "13579", "11111"]);
        let history = History::new(codes(&["13579"]));

        let report = filter_pool(&pool, &history, &FilterCriteria::default());
        // Both positional copies go
        assert_eq!(report.after_history, 2);
        assert_eq!(report.candidates, codes(&["24680", "11111"]));
    }

    #[test]
    fn test_order_is_preserved() {
        let pool = codes(&["90000", "10000", "50000", "30000", "70000"]);
        let criteria = FilterCriteria::default().with_parities([Parity::Odd]);

        let report = filter_pool(&pool, &History::default(), &criteria);
        assert_eq!(report.candidates, pool);

        let criteria = FilterCriteria::default().with_magnitudes([Magnitude::Large]);
        let report = filter_pool(&pool, &History::default(), &criteria);
        assert_eq!(report.candidates, codes(&["90000", "50000", "70000"]));
    }

    #[test]
    fn test_empty_after_sequential_skips_attribute_stage() {
        let pool = codes(&["12345", "98765"]);
        let criteria = FilterCriteria::default();

        let report = filter_pool(&pool, &History::default(), &criteria);
        assert_eq!(report.after_sequential, 0);
        assert_eq!(report.after_attributes, 0);
        assert!(matches!(
            report.ensure_candidates(),
            Err(Error::EmptyAfterHistoryOrSequentialFilter)
        ));
    }

    #[test]
    fn test_empty_after_history() {
        let pool = codes(&["11111"]);
        let history = History::new(codes(&["11111"]));

        let report = filter_pool(&pool, &history, &FilterCriteria::default());
        assert!(matches!(
            report.ensure_candidates(),
            Err(Error::EmptyAfterHistoryOrSequentialFilter)
        ));
    }

    #[test]
    fn test_empty_after_attributes() {
        let pool = codes(&["11111", "31111"]);
        let criteria = FilterCriteria::default().with_digits([2, 4]);

        let report = filter_pool(&pool, &History::default(), &criteria);
        assert_eq!(report.after_sequential, 2);
        assert!(matches!(
            report.ensure_candidates(),
            Err(Error::EmptyAfterAttributeFilter)
        ));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let pool = codes(&["11111", "20202", "31313", "45678", "97531"]);
        let history = History::new(codes(&["20202"]));
        let criteria = FilterCriteria::default().with_digits([1, 3, 9]);

        let first = filter_pool(&pool, &history, &criteria);
        let second = filter_pool(&pool, &history, &criteria);
        assert_eq!(first, second);
    }

    #[test]
    fn test_growing_history_never_grows_candidates() {
        let pool: Vec<Code> = (0..2000)
            .map(|n| Code::parse(&format!("{:05}", n * 37 % 100_000)).unwrap())
            .collect();
        let criteria = FilterCriteria::default();

        let mut history_codes = Vec::new();
        let mut previous = filter_pool(&pool, &History::default(), &criteria).candidates;

        for chunk in pool.chunks(250) {
            history_codes.extend_from_slice(chunk);
            let next = filter_pool(&pool, &History::new(history_codes.clone()), &criteria).candidates;
            assert!(next.len() <= previous.len());
            assert!(next.iter().all(|code| previous.contains(code)));
            previous = next;
        }
        assert!(previous.is_empty());
    }
}
