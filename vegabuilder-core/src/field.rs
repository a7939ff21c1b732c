/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Field reference resolution.
//!
//! User data fields live under the `data` key of every record, while fields
//! injected by a transform (its "extra fields") live at the top level. A
//! symbolic field token is resolved to exactly one of `index`, an extra-field
//! bareword, or `data.<field>`.
use indexmap::IndexSet;
use log::trace;
use vegabuilder_common::naming::to_camel_case;

pub const INDEX_FIELD: &str = "index";
pub const DATA_FIELD: &str = "data";

lazy_static! {
    /// Fields present in every record regardless of the producing transforms
    pub static ref STRUCTURAL_FIELDS: Vec<&'static str> = vec![DATA_FIELD, INDEX_FIELD];
}

/// Ordered set of synthetic field names, stored as they appear in records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraFields {
    fields: IndexSet<String>,
}

impl ExtraFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// The structural fields shared by every record
    pub fn structural() -> Self {
        let mut extra = Self::new();
        extra.extend(STRUCTURAL_FIELDS.iter().copied());
        extra
    }

    pub fn insert<S: AsRef<str>>(&mut self, field: S) {
        let field = field.as_ref();
        if !self.fields.contains(field) {
            self.fields.insert(field.to_string());
        }
    }

    pub fn extend<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for field in fields {
            self.insert(field);
        }
    }

    pub fn union(&self, other: &ExtraFields) -> ExtraFields {
        let mut union = self.clone();
        union.extend(other.iter());
        union
    }

    /// Find the stored name of a field. An exact match wins, otherwise a
    /// snake_case token matches its camelCase spelling (`start_angle` finds
    /// `startAngle`). Case is never folded, so `Count` does not find `count`.
    pub fn lookup(&self, field: &str) -> Option<&str> {
        if let Some(found) = self.fields.get(field) {
            return Some(found.as_str());
        }
        if !field.contains('_') {
            return None;
        }
        self.fields.get(to_camel_case(field).as_str()).map(|f| f.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.lookup(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A symbolic field token split into its optional source and field parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    pub source: Option<String>,
    pub field: Option<String>,
    /// The source names a Data rather than the record's `data` key
    pub qualified: bool,
}

impl FieldReference {
    /// Parse a token whose first segment always names a source, as in
    /// `"table.field"` or `"table"`.
    pub fn parse_qualified(token: &str) -> Self {
        match token.split_once('.') {
            Some((source, field)) => Self {
                source: Some(source.to_string()),
                field: non_empty(field),
                qualified: true,
            },
            None => Self {
                source: Some(token.to_string()),
                field: None,
                qualified: true,
            },
        }
    }

    /// Parse a token evaluated in the context of a known producer. A token
    /// without a dot is a field name.
    pub fn parse_field(token: &str) -> Self {
        match token.split_once('.') {
            Some((source, field)) => Self {
                source: Some(source.to_string()),
                field: non_empty(field),
                qualified: false,
            },
            None => Self {
                source: None,
                field: non_empty(token),
                qualified: false,
            },
        }
    }

    pub fn resolve(&self, extra: &ExtraFields) -> String {
        let resolved = match (self.source.as_deref(), self.field.as_deref()) {
            (_, None) | (_, Some(INDEX_FIELD)) => INDEX_FIELD.to_string(),
            (Some(DATA_FIELD), Some(field)) if !self.qualified => format!("{DATA_FIELD}.{field}"),
            (None, Some(field)) if is_structural(field) => field.to_string(),
            (_, Some(field)) => match extra.lookup(field) {
                Some(found) => found.to_string(),
                None => format!("{DATA_FIELD}.{field}"),
            },
        };
        trace!("Resolved field reference {self:?} to {resolved}");
        resolved
    }
}

/// Names of synthetic fields declared by a transform in builder naming,
/// converted to the names the transform writes into records
pub fn synthetic_fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| to_camel_case(name)).collect()
}

pub fn is_structural(field: &str) -> bool {
    STRUCTURAL_FIELDS.iter().any(|f| *f == field)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Resolve a field token in the context of a producer with the given extra
/// fields. Without any producer context, pass an empty set: user fields then
/// default to `data.<field>` and only the structural names stay bare.
pub fn resolve_field(token: &str, extra: &ExtraFields) -> String {
    FieldReference::parse_field(token).resolve(extra)
}

/// Resolve a `source.field` token. A token with no field part resolves to
/// `index`.
pub fn resolve_qualified(token: &str, extra: &ExtraFields) -> String {
    FieldReference::parse_qualified(token).resolve(extra)
}

/// Resolve a sort field, preserving a leading `-` (descending order)
pub fn resolve_sort_field(token: &str, extra: &ExtraFields) -> String {
    match token.strip_prefix('-') {
        Some(field) => format!("-{}", resolve_field(field, extra)),
        None => resolve_field(token, extra),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet_extra() -> ExtraFields {
        let mut extra = ExtraFields::structural();
        extra.extend(["key", "keys", "values"]);
        extra
    }

    #[test]
    fn test_qualified_resolution() {
        let extra = ExtraFields::structural();
        assert_eq!(resolve_qualified("table.x", &extra), "data.x");
        assert_eq!(resolve_qualified("table", &extra), "index");
        assert_eq!(resolve_qualified("table.index", &extra), "index");
        assert_eq!(resolve_qualified("table.key", &facet_extra()), "key");
        assert_eq!(resolve_qualified("table.key", &extra), "data.key");
    }

    #[test]
    fn test_bare_resolution() {
        let extra = ExtraFields::structural();
        assert_eq!(resolve_field("x", &extra), "data.x");
        assert_eq!(resolve_field("index", &extra), "index");
        assert_eq!(resolve_field("data.x", &facet_extra()), "data.x");
        assert_eq!(resolve_field("key", &facet_extra()), "key");
    }

    #[test]
    fn test_no_context_defaults_to_data() {
        let extra = ExtraFields::new();
        assert_eq!(resolve_field("price", &extra), "data.price");
        assert_eq!(resolve_field("data", &extra), "data");
        assert_eq!(resolve_field("index", &extra), "index");
    }

    #[test]
    fn test_extra_fields_are_camel_cased() {
        let mut extra = ExtraFields::structural();
        extra.extend(synthetic_fields(&["start_angle", "end_angle"]));
        assert_eq!(resolve_field("start_angle", &extra), "startAngle");
        assert_eq!(resolve_field("endAngle", &extra), "endAngle");
    }

    #[test]
    fn test_user_named_outputs_are_kept_verbatim() {
        let mut extra = ExtraFields::structural();
        extra.insert("price_ratio");
        assert_eq!(resolve_field("price_ratio", &extra), "price_ratio");
        assert_eq!(resolve_qualified("table.price_ratio", &extra), "price_ratio");
    }

    #[test]
    fn test_sort_fields_keep_direction() {
        let extra = ExtraFields::structural();
        assert_eq!(resolve_sort_field("-price", &extra), "-data.price");
        assert_eq!(resolve_sort_field("price", &extra), "data.price");
    }

    #[test]
    fn test_lookup_never_folds_case() {
        let mut extra = ExtraFields::structural();
        extra.extend(synthetic_fields(&["count", "sum", "mean"]));
        assert_eq!(extra.lookup("Count"), None);
        assert_eq!(resolve_field("Count", &extra), "data.Count");
        assert_eq!(resolve_qualified("table.Count", &extra), "data.Count");
        assert_eq!(resolve_field("count", &extra), "count");
    }

    #[test]
    fn test_qualified_source_named_data() {
        assert_eq!(resolve_qualified("data.key", &facet_extra()), "key");
        assert_eq!(resolve_qualified("data.x", &facet_extra()), "data.x");
        assert_eq!(resolve_field("data.key", &facet_extra()), "data.key");
    }

    #[test]
    fn test_extra_fields_are_ordered_and_unique() {
        let mut extra = ExtraFields::structural();
        extra.extend(["y", "y2", "y"]);
        assert_eq!(extra.iter().collect::<Vec<_>>(), vec!["data", "index", "y", "y2"]);
        assert_eq!(extra.len(), 4);
    }
}
