//! Limit clamping and keyset page assembly shared by the catalog repositories.
//!
//! Catalog listings page by ascending id. A repository fetches `limit + 1`
//! rows after the cursor; the extra row only signals that another page
//! exists and is never returned.

use cafe_core::error::CoreError;
use cafe_core::fetch::PageToken;
use cafe_core::types::DbId;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit into `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Decode an opaque page token back into the id cursor.
pub fn parse_page_token(token: &str) -> Result<DbId, CoreError> {
    token
        .trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| CoreError::Validation(format!("Invalid page token: {token}")))
}

/// One keyset page of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysetPage<T> {
    pub rows: Vec<T>,
    /// Cursor for the following page; `None` on the last page.
    pub next_after: Option<DbId>,
}

impl<T> KeysetPage<T> {
    /// Build a page from up to `limit + 1` rows fetched in id order.
    pub fn from_lookahead(mut rows: Vec<T>, limit: i64, id_of: impl Fn(&T) -> DbId) -> Self {
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_after = if has_more { rows.last().map(&id_of) } else { None };
        Self { rows, next_after }
    }

    pub fn next_page_token(&self) -> Option<PageToken> {
        self.next_after.map(|id| PageToken::new(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 20);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
        assert_eq!(clamp_limit(Some(42), 20, 100), 42);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
    }

    #[test]
    fn page_token_parses_ids() {
        assert_eq!(parse_page_token("17").unwrap(), 17);
        assert_eq!(parse_page_token(" 3 ").unwrap(), 3);
    }

    #[test]
    fn page_token_rejects_garbage() {
        assert!(parse_page_token("abc").is_err());
        assert!(parse_page_token("").is_err());
        assert!(parse_page_token("-1").is_err());
    }

    #[test]
    fn lookahead_row_signals_more() {
        let page = KeysetPage::from_lookahead(vec![1_i64, 2, 3], 2, |id| *id);
        assert_eq!(page.rows, [1, 2]);
        assert_eq!(page.next_after, Some(2));
        assert_eq!(page.next_page_token(), Some(PageToken::new("2")));
    }

    #[test]
    fn short_page_is_last() {
        let page = KeysetPage::from_lookahead(vec![1_i64, 2], 2, |id| *id);
        assert_eq!(page.rows, [1, 2]);
        assert_eq!(page.next_after, None);

        let empty = KeysetPage::from_lookahead(Vec::<i64>::new(), 5, |id| *id);
        assert!(empty.rows.is_empty());
        assert_eq!(empty.next_page_token(), None);
    }
}
