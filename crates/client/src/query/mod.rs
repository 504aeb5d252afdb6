//! Filter and sort grammar for list queries
//!
//! The server speaks a small MongoDB-flavoured comparison grammar: a filter
//! document is a JSON object of `"field": {"$op": value}` clauses, and a sort
//! document maps field names to `1`/`-1`. Both serialize here. Field names and
//! string values are encoded through `serde_json`, so hostile input ends up
//! escaped instead of corrupting the document.

mod filter;
mod sort;

pub use filter::{FieldFilter, Filters, Operator};
pub use sort::Sort;

/// Join parts with a delimiter, dropping any part shorter than `min` bytes.
pub(crate) fn join_min(delim: &str, min: usize, parts: &[String]) -> String {
    let filtered: Vec<&str> =
        parts.iter().filter(|part| part.len() >= min).map(String::as_str).collect();
    filtered.join(delim)
}

/// Encode a string as a JSON string literal (quoted and escaped).
pub(crate) fn json_str(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_min_drops_short_parts() {
        let parts = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(join_min(",", 1, &parts), "a,b");
    }

    #[test]
    fn json_str_escapes_quotes() {
        assert_eq!(json_str(r#"a"b"#), r#""a\"b""#);
    }
}
