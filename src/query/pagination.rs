use std::collections::HashMap;

use crate::query::params::parse_int_prefix;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset a SQL `OFFSET` accepts.
pub const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// `page` below 1 or unparseable becomes 1; `limit` defaults to 20 and is
    /// clamped to `1..=100`.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let page = parse_int_prefix(params.get("page").map(String::as_str))
            .filter(|page| *page >= 1)
            .map_or(DEFAULT_PAGE, |page| page as u64);

        let limit = parse_int_prefix(params.get("limit").map(String::as_str))
            .map_or(DEFAULT_LIMIT, |limit| limit.clamp(1, MAX_LIMIT as i64) as u64);

        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_SKIP)
    }

    pub fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn has_more(&self, total: u64) -> bool {
        self.page.saturating_mul(self.limit) < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(Pagination::from_params(&params(&[])), Pagination::default());
    }

    #[test]
    fn page_below_one_or_garbage_is_first_page() {
        for page in ["0", "-4", "abc", ""] {
            let pagination = Pagination::from_params(&params(&[("page", page)]));
            assert_eq!(pagination.page, 1, "page={page}");
        }
        let pagination = Pagination::from_params(&params(&[("page", "7")]));
        assert_eq!(pagination.page, 7);
    }

    #[test]
    fn limit_is_clamped() {
        let cases = [
            ("0", 1),
            ("-10", 1),
            ("1", 1),
            ("55", 55),
            ("100", 100),
            ("101", 100),
            ("100000", 100),
            ("abc", 20),
        ];
        for (limit, expected) in cases {
            let pagination = Pagination::from_params(&params(&[("limit", limit)]));
            assert_eq!(pagination.limit, expected, "limit={limit}");
        }
    }

    #[test]
    fn skip_is_zero_based_offset() {
        let pagination = Pagination { page: 3, limit: 20 };
        assert_eq!(pagination.skip(), 40);
        assert_eq!(Pagination::default().skip(), 0);
    }

    #[test]
    fn huge_pages_stay_within_sql_offset_range() {
        let pagination = Pagination::from_params(&params(&[
            ("page", "100000000000000000"),
            ("limit", "100"),
        ]));
        assert_eq!(pagination.page, 100_000_000_000_000_000);
        assert_eq!(pagination.skip(), MAX_SKIP);
        assert!(i64::try_from(pagination.skip()).is_ok());
        assert!(!pagination.has_more(1_000));
    }

    #[test]
    fn has_more_iff_page_times_limit_below_total() {
        for page in 1..=6u64 {
            for limit in [1u64, 7, 20, 100] {
                for total in [0u64, 1, 19, 20, 21, 140, 141] {
                    let pagination = Pagination { page, limit };
                    assert_eq!(pagination.has_more(total), page * limit < total);
                }
            }
        }
    }

    #[test]
    fn pages_rounds_up() {
        let pagination = Pagination { page: 1, limit: 20 };
        assert_eq!(pagination.pages(0), 0);
        assert_eq!(pagination.pages(1), 1);
        assert_eq!(pagination.pages(20), 1);
        assert_eq!(pagination.pages(21), 2);
    }
}
