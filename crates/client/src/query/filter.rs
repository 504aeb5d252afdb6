//! Field comparison filters

use std::fmt;

use super::{join_min, json_str};

/// Comparison operators understood by the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    Regex,
    In,
    NotIn,
    Not,
    Now,
}

impl Operator {
    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "$eq",
            Self::NotEquals => "$ne",
            Self::LessThan => "$lt",
            Self::LessThanOrEqualTo => "$lte",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqualTo => "$gte",
            Self::Regex => "$regex",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::Not => "$not",
            Self::Now => "$now",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-comparison clause.
///
/// Each variant serializes to a `"field": {"$op": value}` fragment of the
/// enclosing filter document.
#[derive(Debug, Clone)]
pub enum FieldFilter {
    /// Existence check against `null` (`$ne null` = exists, `$eq null` =
    /// missing).
    Exists { field: String, operator: Operator },

    /// Boolean comparison.
    Bool { field: String, operator: Operator, value: bool },

    /// Unsigned numeric comparison.
    Number { field: String, operator: Operator, value: u64 },

    /// String comparison.
    Str { field: String, operator: Operator, value: String },

    /// Multi-value membership; always uses the `$in` operator.
    OneOf { field: String, values: Vec<String> },
}

impl FieldFilter {
    /// Filter on field existence. `wanted = true` matches documents where the
    /// field is present.
    #[must_use]
    pub fn exists(field: impl Into<String>, wanted: bool) -> Self {
        let operator = if wanted { Operator::NotEquals } else { Operator::Equals };
        Self::Exists { field: field.into(), operator }
    }

    /// Boolean comparison filter.
    #[must_use]
    pub fn boolean(field: impl Into<String>, operator: Operator, value: bool) -> Self {
        Self::Bool { field: field.into(), operator, value }
    }

    /// Unsigned numeric comparison filter.
    #[must_use]
    pub fn number(field: impl Into<String>, operator: Operator, value: u64) -> Self {
        Self::Number { field: field.into(), operator, value }
    }

    /// String comparison filter.
    #[must_use]
    pub fn string(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::Str { field: field.into(), operator, value: value.into() }
    }

    /// Membership filter matching any of `values`.
    #[must_use]
    pub fn one_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::OneOf { field: field.into(), values }
    }

    /// Serialize the clause to a `"field": {"$op": value}` fragment.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        match self {
            Self::Exists { field, operator } => {
                format!("{}: {{{}: null}}", json_str(field), json_str(operator.as_str()))
            }
            Self::Bool { field, operator, value } => {
                format!("{}: {{{}: {value}}}", json_str(field), json_str(operator.as_str()))
            }
            Self::Number { field, operator, value } => {
                format!("{}: {{{}: {value}}}", json_str(field), json_str(operator.as_str()))
            }
            Self::Str { field, operator, value } => format!(
                "{}: {{{}: {}}}",
                json_str(field),
                json_str(operator.as_str()),
                json_str(value)
            ),
            Self::OneOf { field, values } => {
                let encoded: Vec<String> = values
                    .iter()
                    .filter(|value| !value.is_empty())
                    .map(|value| json_str(value))
                    .collect();
                format!(
                    "{}: {{{}: [{}]}}",
                    json_str(field),
                    json_str(Operator::In.as_str()),
                    join_min(",", 1, &encoded)
                )
            }
        }
    }
}

/// An ordered set of filter clauses.
///
/// Serializes to `{frag1,frag2}` preserving insertion order; an empty set
/// serializes to `""` so the caller can omit the `filter` parameter.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    items: Vec<FieldFilter>,
}

impl Filters {
    /// Build a set from an initial collection of clauses.
    #[must_use]
    pub fn new(filters: impl IntoIterator<Item = FieldFilter>) -> Self {
        Self { items: filters.into_iter().collect() }
    }

    /// Append a clause, preserving insertion order.
    pub fn push(&mut self, filter: FieldFilter) {
        self.items.push(filter);
    }

    /// Chaining variant of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, filter: FieldFilter) -> Self {
        self.items.push(filter);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize the set to the complete filter document.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }

        let fragments: Vec<String> = self.items.iter().map(FieldFilter::to_fragment).collect();
        format!("{{{}}}", join_min(",", 1, &fragments))
    }
}
