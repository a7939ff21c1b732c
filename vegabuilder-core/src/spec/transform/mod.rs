/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Data transforms. Each kind is its own struct with a closed set of
//! properties; [`TransformSpec`] is the tagged union over all of them.
pub mod array;
pub mod copy;
pub mod cross;
pub mod facet;
pub mod filter;
pub mod flatten;
pub mod fold;
pub mod force;
pub mod formula;
pub mod geo;
pub mod link;
pub mod pie;
pub mod slice;
pub mod sort;
pub mod stack;
pub mod stats;
pub mod treemap;
pub mod truncate;
pub mod unique;
pub mod window;
pub mod wordcloud;
pub mod zip;

use crate::attributes::{exact_arity, serialize_fields, Attribute, Serializable};
use crate::error::{Result, ResultWithContext, VegaBuilderError};
use crate::field::ExtraFields;
use crate::registry::Registry;
use crate::spec::transform::array::ArrayTransformSpec;
use crate::spec::transform::copy::CopyTransformSpec;
use crate::spec::transform::cross::CrossTransformSpec;
use crate::spec::transform::facet::FacetTransformSpec;
use crate::spec::transform::filter::FilterTransformSpec;
use crate::spec::transform::flatten::FlattenTransformSpec;
use crate::spec::transform::fold::FoldTransformSpec;
use crate::spec::transform::force::ForceTransformSpec;
use crate::spec::transform::formula::FormulaTransformSpec;
use crate::spec::transform::geo::{GeoTransformSpec, GeopathTransformSpec};
use crate::spec::transform::link::LinkTransformSpec;
use crate::spec::transform::pie::PieTransformSpec;
use crate::spec::transform::slice::SliceTransformSpec;
use crate::spec::transform::sort::SortTransformSpec;
use crate::spec::transform::stack::StackTransformSpec;
use crate::spec::transform::stats::StatsTransformSpec;
use crate::spec::transform::treemap::TreemapTransformSpec;
use crate::spec::transform::truncate::TruncateTransformSpec;
use crate::spec::transform::unique::UniqueTransformSpec;
use crate::spec::transform::window::WindowTransformSpec;
use crate::spec::transform::wordcloud::WordcloudTransformSpec;
use crate::spec::transform::zip::ZipTransformSpec;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransformSpec {
    Array(ArrayTransformSpec),
    Copy(CopyTransformSpec),
    Cross(CrossTransformSpec),
    Facet(FacetTransformSpec),
    Filter(FilterTransformSpec),
    Flatten(FlattenTransformSpec),
    Fold(FoldTransformSpec),
    Formula(FormulaTransformSpec),
    Slice(SliceTransformSpec),
    Sort(SortTransformSpec),
    Stats(StatsTransformSpec),
    Truncate(TruncateTransformSpec),
    Unique(UniqueTransformSpec),
    Window(WindowTransformSpec),
    Zip(ZipTransformSpec),

    // Layout
    Force(ForceTransformSpec),
    Geo(GeoTransformSpec),
    GeoPath(GeopathTransformSpec),
    Link(LinkTransformSpec),
    Pie(PieTransformSpec),
    Stack(StackTransformSpec),
    Treemap(Box<TreemapTransformSpec>),
    WordCloud(Box<WordcloudTransformSpec>),
}

impl Deref for TransformSpec {
    type Target = dyn TransformSpecTrait;

    fn deref(&self) -> &Self::Target {
        match self {
            TransformSpec::Array(t) => t,
            TransformSpec::Copy(t) => t,
            TransformSpec::Cross(t) => t,
            TransformSpec::Facet(t) => t,
            TransformSpec::Filter(t) => t,
            TransformSpec::Flatten(t) => t,
            TransformSpec::Fold(t) => t,
            TransformSpec::Formula(t) => t,
            TransformSpec::Slice(t) => t,
            TransformSpec::Sort(t) => t,
            TransformSpec::Stats(t) => t,
            TransformSpec::Truncate(t) => t,
            TransformSpec::Unique(t) => t,
            TransformSpec::Window(t) => t,
            TransformSpec::Zip(t) => t,
            TransformSpec::Force(t) => t,
            TransformSpec::Geo(t) => t,
            TransformSpec::GeoPath(t) => t,
            TransformSpec::Link(t) => t,
            TransformSpec::Pie(t) => t,
            TransformSpec::Stack(t) => t,
            TransformSpec::Treemap(t) => t.as_ref(),
            TransformSpec::WordCloud(t) => t.as_ref(),
        }
    }
}

impl DerefMut for TransformSpec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            TransformSpec::Array(t) => t,
            TransformSpec::Copy(t) => t,
            TransformSpec::Cross(t) => t,
            TransformSpec::Facet(t) => t,
            TransformSpec::Filter(t) => t,
            TransformSpec::Flatten(t) => t,
            TransformSpec::Fold(t) => t,
            TransformSpec::Formula(t) => t,
            TransformSpec::Slice(t) => t,
            TransformSpec::Sort(t) => t,
            TransformSpec::Stats(t) => t,
            TransformSpec::Truncate(t) => t,
            TransformSpec::Unique(t) => t,
            TransformSpec::Window(t) => t,
            TransformSpec::Zip(t) => t,
            TransformSpec::Force(t) => t,
            TransformSpec::Geo(t) => t,
            TransformSpec::GeoPath(t) => t,
            TransformSpec::Link(t) => t,
            TransformSpec::Pie(t) => t,
            TransformSpec::Stack(t) => t,
            TransformSpec::Treemap(t) => t.as_mut(),
            TransformSpec::WordCloud(t) => t.as_mut(),
        }
    }
}

impl TransformSpec {
    /// Build a transform of the given kind from a JSON object of properties.
    /// Unknown keys, missing required keys and wrongly shaped values are
    /// rejected.
    pub fn from_properties(kind: TransformKind, properties: Value) -> Result<Self> {
        let properties = match properties {
            Value::Object(properties) => properties,
            Value::Null => Map::new(),
            other => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Properties of a {} transform must be an object, received {other}",
                    kind.as_str()
                )))
            }
        };
        if properties.contains_key("type") {
            return Err(VegaBuilderError::invalid_input(
                "Transform properties may not contain a type key",
            ));
        }

        let mut tagged = Map::new();
        tagged.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        tagged.extend(properties);

        let spec = serde_json::from_value::<TransformSpec>(Value::Object(tagged))
            .map_err(|err| VegaBuilderError::invalid_input(err.to_string()))
            .with_context(|| format!("Invalid {} transform", kind.as_str()))?;
        spec.check()
            .with_context(|| format!("Invalid {} transform", kind.as_str()))?;
        Ok(spec)
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            TransformSpec::Array(_) => TransformKind::Array,
            TransformSpec::Copy(_) => TransformKind::Copy,
            TransformSpec::Cross(_) => TransformKind::Cross,
            TransformSpec::Facet(_) => TransformKind::Facet,
            TransformSpec::Filter(_) => TransformKind::Filter,
            TransformSpec::Flatten(_) => TransformKind::Flatten,
            TransformSpec::Fold(_) => TransformKind::Fold,
            TransformSpec::Formula(_) => TransformKind::Formula,
            TransformSpec::Slice(_) => TransformKind::Slice,
            TransformSpec::Sort(_) => TransformKind::Sort,
            TransformSpec::Stats(_) => TransformKind::Stats,
            TransformSpec::Truncate(_) => TransformKind::Truncate,
            TransformSpec::Unique(_) => TransformKind::Unique,
            TransformSpec::Window(_) => TransformKind::Window,
            TransformSpec::Zip(_) => TransformKind::Zip,
            TransformSpec::Force(_) => TransformKind::Force,
            TransformSpec::Geo(_) => TransformKind::Geo,
            TransformSpec::GeoPath(_) => TransformKind::GeoPath,
            TransformSpec::Link(_) => TransformKind::Link,
            TransformSpec::Pie(_) => TransformKind::Pie,
            TransformSpec::Stack(_) => TransformKind::Stack,
            TransformSpec::Treemap(_) => TransformKind::Treemap,
            TransformSpec::WordCloud(_) => TransformKind::WordCloud,
        }
    }

    /// Validate, then resolve field properties against `extra`. Returns the
    /// extra fields available downstream of this transform.
    pub fn attach(&mut self, extra: &ExtraFields, registry: &Registry) -> Result<ExtraFields> {
        let kind = self.kind();
        self.check()
            .and_then(|_| self.validate(registry))
            .with_context(|| format!("Invalid {} transform", kind.as_str()))?;
        self.resolve_fields(extra, registry)
            .with_context(|| format!("Failed to resolve fields of {} transform", kind.as_str()))?;
        let mut downstream = extra.clone();
        downstream.extend(self.extra_fields());
        Ok(downstream)
    }
}

impl Serializable for TransformSpec {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        serialize_fields(self)
    }
}

pub trait TransformSpecTrait {
    /// Check rules on the properties alone that their types cannot express
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Check rules that depend on what is already registered
    fn validate(&self, _registry: &Registry) -> Result<()> {
        Ok(())
    }

    /// Fields this transform adds to every record flowing through it
    fn extra_fields(&self) -> Vec<String> {
        Default::default()
    }

    /// Rewrite field-naming properties to canonical paths
    fn resolve_fields(&mut self, _extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        Ok(())
    }

    /// Names of other Data this transform reads
    fn referenced_data(&self) -> Vec<String> {
        Default::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Array,
    Copy,
    Cross,
    Facet,
    Filter,
    Flatten,
    Fold,
    Formula,
    Slice,
    Sort,
    Stats,
    Truncate,
    Unique,
    Window,
    Zip,
    Force,
    Geo,
    GeoPath,
    Link,
    Pie,
    Stack,
    Treemap,
    WordCloud,
}

impl TransformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Array => "array",
            TransformKind::Copy => "copy",
            TransformKind::Cross => "cross",
            TransformKind::Facet => "facet",
            TransformKind::Filter => "filter",
            TransformKind::Flatten => "flatten",
            TransformKind::Fold => "fold",
            TransformKind::Formula => "formula",
            TransformKind::Slice => "slice",
            TransformKind::Sort => "sort",
            TransformKind::Stats => "stats",
            TransformKind::Truncate => "truncate",
            TransformKind::Unique => "unique",
            TransformKind::Window => "window",
            TransformKind::Zip => "zip",
            TransformKind::Force => "force",
            TransformKind::Geo => "geo",
            TransformKind::GeoPath => "geopath",
            TransformKind::Link => "link",
            TransformKind::Pie => "pie",
            TransformKind::Stack => "stack",
            TransformKind::Treemap => "treemap",
            TransformKind::WordCloud => "wordcloud",
        }
    }

    pub fn all() -> &'static [TransformKind] {
        &ALL_TRANSFORM_KINDS
    }
}

const ALL_TRANSFORM_KINDS: [TransformKind; 23] = [
    TransformKind::Array,
    TransformKind::Copy,
    TransformKind::Cross,
    TransformKind::Facet,
    TransformKind::Filter,
    TransformKind::Flatten,
    TransformKind::Fold,
    TransformKind::Formula,
    TransformKind::Slice,
    TransformKind::Sort,
    TransformKind::Stats,
    TransformKind::Truncate,
    TransformKind::Unique,
    TransformKind::Window,
    TransformKind::Zip,
    TransformKind::Force,
    TransformKind::Geo,
    TransformKind::GeoPath,
    TransformKind::Link,
    TransformKind::Pie,
    TransformKind::Stack,
    TransformKind::Treemap,
    TransformKind::WordCloud,
];

impl Display for TransformKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransformKind {
    type Err = VegaBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        ALL_TRANSFORM_KINDS
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| VegaBuilderError::invalid_input(format!("Unknown transform type: {s}")))
    }
}

lazy_static! {
    static ref DATUM_RE: Regex = Regex::new(r"\bd\b").unwrap();
}

/// Expressions are evaluated per record and must reference the datum `d`
pub(crate) fn check_datum_expr(property: &str, expr: &str) -> Result<()> {
    if DATUM_RE.is_match(expr) {
        Ok(())
    } else {
        Err(VegaBuilderError::invalid_input(format!(
            "Expression for {property} must reference the datum d: {expr}"
        )))
    }
}

pub(crate) fn check_registered_data(registry: &Registry, property: &str, name: &str) -> Result<()> {
    registry
        .expect_data(name)
        .with_context(|| format!("Property {property} must name a registered Data"))?;
    Ok(())
}

pub(crate) fn check_pair(property: &str, values: &Option<Vec<f64>>) -> Result<()> {
    match values {
        Some(values) => exact_arity(property, values, 2),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::collect_attributes;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        for kind in TransformKind::all() {
            assert_eq!(&TransformKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(TransformKind::from_str("aggregate").is_err());
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let err = TransformSpec::from_properties(
            TransformKind::Sort,
            json!({"by": "price", "order": "desc"}),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_required_property_is_rejected() {
        assert!(TransformSpec::from_properties(TransformKind::Formula, json!({"expr": "d.x"}))
            .is_err());
    }

    #[test]
    fn test_type_key_is_rejected() {
        assert!(
            TransformSpec::from_properties(TransformKind::Flatten, json!({"type": "fold"}))
                .is_err()
        );
    }

    #[test]
    fn test_serialized_keys_are_camel_cased() {
        let force = TransformSpec::from_properties(
            TransformKind::Force,
            json!({"link_distance": 30, "iterations": 100}),
        )
        .unwrap();
        assert_eq!(
            collect_attributes(&force),
            json!({"type": "force", "iterations": 100, "linkDistance": 30.0})
        );
    }

    #[rstest(
        kind,
        properties,
        case(TransformKind::Filter, json!({"test": "data.y > 2"})),
        case(TransformKind::Formula, json!({"field": "z", "expr": "x * 2"})),
        case(TransformKind::Copy, json!({"from": "mouse", "fields": ["a", "b"], "as": ["x"]})),
        case(TransformKind::Force, json!({"size": [500]})),
        case(TransformKind::Link, json!({"tension": -1}))
    )]
    fn test_property_rules_are_checked_on_construction(kind: TransformKind, properties: Value) {
        let err = TransformSpec::from_properties(kind, properties).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_datum_expression() {
        assert!(check_datum_expr("test", "d.data.x > 2").is_ok());
        assert!(check_datum_expr("test", "data.x > 2").is_err());
    }
}
