/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Scales and the resolution of their domains and ranges.
//!
//! A domain or range is a reference into a registered Data (`"table.x"`), a
//! literal array, or for ranges a keyword such as `colors`.
use crate::attributes::{Attribute, Flag, Serializable};
use crate::context::BuildContext;
use crate::error::{Result, ResultWithContext, VegaBuilderError};
use crate::field::{FieldReference, INDEX_FIELD};
use crate::registry::Registry;
use crate::spec::data::Data;
use itertools::Itertools;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Linear,
    Log,
    Pow,
    Sqrt,
    Quantile,
    Quantize,
    Threshold,
    Ordinal,
    Time,
    Utc,
}

impl ScaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::Linear => "linear",
            ScaleType::Log => "log",
            ScaleType::Pow => "pow",
            ScaleType::Sqrt => "sqrt",
            ScaleType::Quantile => "quantile",
            ScaleType::Quantize => "quantize",
            ScaleType::Threshold => "threshold",
            ScaleType::Ordinal => "ordinal",
            ScaleType::Time => "time",
            ScaleType::Utc => "utc",
        }
    }

    pub fn is_quantitative(&self) -> bool {
        matches!(
            self,
            ScaleType::Linear
                | ScaleType::Log
                | ScaleType::Pow
                | ScaleType::Sqrt
                | ScaleType::Quantile
                | ScaleType::Quantize
                | ScaleType::Threshold
        )
    }

    pub fn is_time(&self) -> bool {
        matches!(self, ScaleType::Time | ScaleType::Utc)
    }

    pub fn is_ordinal(&self) -> bool {
        matches!(self, ScaleType::Ordinal)
    }
}

impl Display for ScaleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = VegaBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "linear" => ScaleType::Linear,
            "log" => ScaleType::Log,
            "pow" => ScaleType::Pow,
            "sqrt" => ScaleType::Sqrt,
            "quantile" => ScaleType::Quantile,
            "quantize" => ScaleType::Quantize,
            "threshold" => ScaleType::Threshold,
            "ordinal" => ScaleType::Ordinal,
            "time" => ScaleType::Time,
            "utc" => ScaleType::Utc,
            _ => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Unknown scale type: {s}"
                )))
            }
        })
    }
}

/// Keywords accepted as a scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeLiteral {
    Colors,
    MoreColors,
    Width,
    Height,
    Shapes,
}

impl RangeLiteral {
    /// The literal written to the document
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeLiteral::Colors => "category10",
            RangeLiteral::MoreColors => "category20",
            RangeLiteral::Width => "width",
            RangeLiteral::Height => "height",
            RangeLiteral::Shapes => "shapes",
        }
    }
}

impl FromStr for RangeLiteral {
    type Err = VegaBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "colors" => RangeLiteral::Colors,
            "more_colors" => RangeLiteral::MoreColors,
            "width" => RangeLiteral::Width,
            "height" => RangeLiteral::Height,
            "shapes" => RangeLiteral::Shapes,
            _ => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Unrecognized range literal: {s}"
                )))
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInterval::Second => "second",
            TimeInterval::Minute => "minute",
            TimeInterval::Hour => "hour",
            TimeInterval::Day => "day",
            TimeInterval::Week => "week",
            TimeInterval::Month => "month",
            TimeInterval::Year => "year",
        }
    }
}

/// Boolean for quantitative scales, an interval for time scales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nice {
    Enabled(bool),
    Interval(TimeInterval),
}

impl Nice {
    fn to_value(self) -> Value {
        match self {
            Nice::Enabled(enabled) => Value::Bool(enabled),
            Nice::Interval(interval) => Value::String(interval.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRefField {
    Single(String),
    Multiple(Vec<String>),
}

/// Resolved pointer into the records of a registered Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRef {
    pub data: String,
    pub field: DataRefField,
}

impl Serializable for DataRef {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        let field = match &self.field {
            DataRefField::Single(field) => Value::String(field.clone()),
            DataRefField::Multiple(fields) => Value::from(fields.clone()),
        };
        vec![
            ("data".to_string(), Attribute::Value(Value::String(self.data.clone()))),
            ("field".to_string(), Attribute::Value(field)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScaleValue {
    Ref(DataRef),
    Values(Vec<Value>),
    Literal(Value),
}

impl ScaleValue {
    fn attribute(&self) -> Attribute<'_> {
        match self {
            ScaleValue::Ref(data_ref) => Attribute::Node(data_ref),
            ScaleValue::Values(values) => Attribute::Value(Value::Array(values.clone())),
            ScaleValue::Literal(value) => Attribute::Value(value.clone()),
        }
    }

    pub fn data_ref(&self) -> Option<&DataRef> {
        match self {
            ScaleValue::Ref(data_ref) => Some(data_ref),
            _ => None,
        }
    }
}

/// Unresolved domain or range input
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleInput {
    /// `"data.field"`, `"data"`, or a range keyword
    Reference(String),
    Data(String),
    Values(Vec<Value>),
    Literal(Value),
}

impl From<&str> for ScaleInput {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_string())
    }
}

impl From<&String> for ScaleInput {
    fn from(reference: &String) -> Self {
        Self::Reference(reference.clone())
    }
}

impl From<String> for ScaleInput {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

impl From<&Data> for ScaleInput {
    fn from(data: &Data) -> Self {
        Self::Data(data.name.clone())
    }
}

impl From<Vec<Value>> for ScaleInput {
    fn from(values: Vec<Value>) -> Self {
        Self::Values(values)
    }
}

impl From<Vec<&str>> for ScaleInput {
    fn from(values: Vec<&str>) -> Self {
        Self::Values(values.into_iter().map(Value::from).collect())
    }
}

impl From<[f64; 2]> for ScaleInput {
    fn from(values: [f64; 2]) -> Self {
        Self::Values(values.iter().map(|v| Value::from(*v)).collect())
    }
}

impl From<[i64; 2]> for ScaleInput {
    fn from(values: [i64; 2]) -> Self {
        Self::Values(values.iter().map(|v| Value::from(*v)).collect())
    }
}

impl From<f64> for ScaleInput {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for ScaleInput {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i32> for ScaleInput {
    fn from(value: i32) -> Self {
        Self::Literal(Value::from(value))
    }
}

/// Build a DataRef from `"data.field"` or `"data"`. The field defaults to
/// `index` when omitted, and always is `index` for flat inline values.
pub fn resolve_data_ref(registry: &Registry, reference: &str) -> Result<DataRef> {
    let parsed = FieldReference::parse_qualified(reference);
    let name = parsed.source.as_deref().unwrap_or(reference);
    let data = registry.expect_data(name)?;
    let field = if parsed.field.is_none() || data.is_flat() {
        INDEX_FIELD.to_string()
    } else {
        parsed.resolve(data.extra_fields())
    };
    Ok(DataRef {
        data: data.name.clone(),
        field: DataRefField::Single(field),
    })
}

fn resolve_data_object(registry: &Registry, name: &str) -> Result<DataRef> {
    registry.expect_data(name)?;
    Ok(DataRef {
        data: name.to_string(),
        field: DataRefField::Single(INDEX_FIELD.to_string()),
    })
}

fn resolve_domain(registry: &Registry, input: ScaleInput) -> Result<ScaleValue> {
    Ok(match input {
        ScaleInput::Reference(reference) => ScaleValue::Ref(resolve_data_ref(registry, &reference)?),
        ScaleInput::Data(name) => ScaleValue::Ref(resolve_data_object(registry, &name)?),
        ScaleInput::Values(values) => ScaleValue::Values(values),
        ScaleInput::Literal(value) => ScaleValue::Literal(value),
    })
}

/// Range keywords win over Data names. A string that is neither a keyword
/// nor a reference to a registered Data is rejected.
fn resolve_range(registry: &Registry, input: ScaleInput) -> Result<ScaleValue> {
    match input {
        ScaleInput::Reference(reference) => {
            if let Ok(literal) = RangeLiteral::from_str(&reference) {
                Ok(ScaleValue::Literal(Value::String(literal.as_str().to_string())))
            } else if reference.contains('.') || registry.find_data(&reference).is_some() {
                Ok(ScaleValue::Ref(resolve_data_ref(registry, &reference)?))
            } else {
                Err(VegaBuilderError::invalid_input(format!(
                    "Unrecognized range literal: {reference}"
                )))
            }
        }
        other => resolve_domain(registry, other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub name: String,
    pub type_: ScaleType,
    pub domain: Option<ScaleValue>,
    pub domain_min: Option<ScaleValue>,
    pub domain_max: Option<ScaleValue>,
    pub range: Option<ScaleValue>,
    pub range_min: Option<ScaleValue>,
    pub range_max: Option<ScaleValue>,
    pub reverse: Flag,
    pub round: Flag,
    pub points: Flag,
    pub padding: Option<f64>,
    pub sort: Flag,
    pub clamp: Flag,
    pub nice: Option<Nice>,
    pub exponent: Option<f64>,
    pub zero: Option<bool>,
}

impl Scale {
    pub fn new(name: &str, type_: ScaleType) -> Self {
        Self {
            name: name.to_string(),
            type_,
            domain: None,
            domain_min: None,
            domain_max: None,
            range: None,
            range_min: None,
            range_max: None,
            reverse: Default::default(),
            round: Default::default(),
            points: Default::default(),
            padding: None,
            sort: Default::default(),
            clamp: Default::default(),
            nice: None,
            exponent: None,
            zero: None,
        }
    }

    /// Data referenced by the domain and range, in declaration order
    pub fn data_refs(&self) -> Vec<&DataRef> {
        [
            &self.domain,
            &self.domain_min,
            &self.domain_max,
            &self.range,
            &self.range_min,
            &self.range_max,
        ]
        .into_iter()
        .filter_map(|value| value.as_ref().and_then(|value| value.data_ref()))
        .collect()
    }
}

fn scale_value(value: &Option<ScaleValue>) -> Attribute<'_> {
    match value {
        Some(value) => value.attribute(),
        None => Attribute::Undefined,
    }
}

impl Serializable for Scale {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("name".to_string(), Attribute::Value(Value::String(self.name.clone()))),
            (
                "type".to_string(),
                Attribute::Value(Value::String(self.type_.as_str().to_string())),
            ),
            ("domain".to_string(), scale_value(&self.domain)),
            ("domain_min".to_string(), scale_value(&self.domain_min)),
            ("domain_max".to_string(), scale_value(&self.domain_max)),
            ("range".to_string(), scale_value(&self.range)),
            ("range_min".to_string(), scale_value(&self.range_min)),
            ("range_max".to_string(), scale_value(&self.range_max)),
            ("reverse".to_string(), self.reverse.attribute()),
            ("round".to_string(), self.round.attribute()),
            ("points".to_string(), self.points.attribute()),
            ("padding".to_string(), Attribute::value(self.padding)),
            ("sort".to_string(), self.sort.attribute()),
            ("clamp".to_string(), self.clamp.attribute()),
            ("nice".to_string(), Attribute::value(self.nice.map(Nice::to_value))),
            ("exponent".to_string(), Attribute::value(self.exponent)),
            ("zero".to_string(), Attribute::value(self.zero)),
        ]
    }
}

pub struct ScaleBuilder<'a> {
    ctx: &'a BuildContext,
    scale: Scale,
}

impl<'a> ScaleBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, name: &str, type_: ScaleType) -> Self {
        Self {
            ctx,
            scale: Scale::new(name, type_),
        }
    }

    pub fn domain<I: Into<ScaleInput>>(mut self, domain: I) -> Result<Self> {
        let domain = resolve_domain(&self.ctx.registry(), domain.into())
            .with_context(|| format!("Invalid domain for scale {}", self.scale.name))?;
        self.scale.domain = Some(domain);
        Ok(self)
    }

    /// Set the domain together with explicit lower and upper bounds
    pub fn domain_bounded<I, L, U>(self, domain: I, min: L, max: U) -> Result<Self>
    where
        I: Into<ScaleInput>,
        L: Into<ScaleInput>,
        U: Into<ScaleInput>,
    {
        self.domain(domain)?
            .domain_bounds(Some(min.into()), Some(max.into()))
    }

    /// Bounds come in pairs, giving only one of them is an error
    pub fn domain_bounds(mut self, min: Option<ScaleInput>, max: Option<ScaleInput>) -> Result<Self> {
        match (min, max) {
            (Some(min), Some(max)) => {
                let registry = self.ctx.registry();
                let min = resolve_domain(&registry, min)?;
                let max = resolve_domain(&registry, max)?;
                drop(registry);
                self.scale.domain_min = Some(min);
                self.scale.domain_max = Some(max);
                Ok(self)
            }
            (None, None) => Ok(self),
            _ => Err(VegaBuilderError::invalid_input(format!(
                "Scale {} needs both a domain minimum and maximum",
                self.scale.name
            ))),
        }
    }

    /// Domain spanning several fields of one Data, as in
    /// `["people.born", "people.died"]`
    pub fn domain_fields(mut self, references: &[&str]) -> Result<Self> {
        let refs = {
            let registry = self.ctx.registry();
            references
                .iter()
                .map(|reference| resolve_data_ref(&registry, reference))
                .collect::<Result<Vec<_>>>()?
        };
        let data = refs.iter().map(|r| r.data.as_str()).unique().collect::<Vec<_>>();
        let data = match data.as_slice() {
            [data] => data.to_string(),
            _ => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Fields of a multi-field domain must come from one Data, received {}",
                    data.iter().join(", ")
                )))
            }
        };
        let fields = refs
            .into_iter()
            .filter_map(|r| match r.field {
                DataRefField::Single(field) => Some(field),
                DataRefField::Multiple(_) => None,
            })
            .collect();
        self.scale.domain = Some(ScaleValue::Ref(DataRef {
            data,
            field: DataRefField::Multiple(fields),
        }));
        Ok(self)
    }

    pub fn range<I: Into<ScaleInput>>(mut self, range: I) -> Result<Self> {
        let range = resolve_range(&self.ctx.registry(), range.into())
            .with_context(|| format!("Invalid range for scale {}", self.scale.name))?;
        self.scale.range = Some(range);
        Ok(self)
    }

    pub fn range_literal(mut self, literal: RangeLiteral) -> Self {
        self.scale.range = Some(ScaleValue::Literal(Value::String(
            literal.as_str().to_string(),
        )));
        self
    }

    pub fn range_min<I: Into<ScaleInput>>(mut self, min: I) -> Result<Self> {
        self.scale.range_min = Some(resolve_domain(&self.ctx.registry(), min.into())?);
        Ok(self)
    }

    pub fn range_max<I: Into<ScaleInput>>(mut self, max: I) -> Result<Self> {
        self.scale.range_max = Some(resolve_domain(&self.ctx.registry(), max.into())?);
        Ok(self)
    }

    pub fn reverse(mut self) -> Self {
        self.scale.reverse.set();
        self
    }

    pub fn round(mut self) -> Self {
        self.scale.round.set();
        self
    }

    fn require(&self, property: &str, allowed: bool) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(VegaBuilderError::invalid_input(format!(
                "Property {property} is not valid for {} scale {}",
                self.scale.type_, self.scale.name
            )))
        }
    }

    pub fn points(mut self) -> Result<Self> {
        self.require("points", self.scale.type_.is_ordinal())?;
        self.scale.points.set();
        Ok(self)
    }

    pub fn padding(mut self, padding: f64) -> Result<Self> {
        self.require("padding", self.scale.type_.is_ordinal())?;
        self.scale.padding = Some(padding);
        Ok(self)
    }

    pub fn sort(mut self) -> Result<Self> {
        self.require("sort", self.scale.type_.is_ordinal())?;
        self.scale.sort.set();
        Ok(self)
    }

    pub fn clamp(mut self) -> Result<Self> {
        let type_ = self.scale.type_;
        self.require("clamp", type_.is_quantitative() || type_.is_time())?;
        self.scale.clamp.set();
        Ok(self)
    }

    pub fn nice(mut self, nice: Nice) -> Result<Self> {
        let type_ = self.scale.type_;
        match nice {
            Nice::Interval(_) => self.require("nice interval", type_.is_time())?,
            Nice::Enabled(_) => self.require("nice", type_.is_quantitative())?,
        }
        self.scale.nice = Some(nice);
        Ok(self)
    }

    pub fn exponent(mut self, exponent: f64) -> Result<Self> {
        let type_ = self.scale.type_;
        self.require(
            "exponent",
            matches!(type_, ScaleType::Pow | ScaleType::Sqrt),
        )?;
        self.scale.exponent = Some(exponent);
        Ok(self)
    }

    pub fn zero(mut self, zero: bool) -> Result<Self> {
        self.require("zero", self.scale.type_.is_quantitative())?;
        self.scale.zero = Some(zero);
        Ok(self)
    }

    pub fn build(self) -> Result<Scale> {
        if self.scale.name.trim().is_empty() {
            return Err(VegaBuilderError::invalid_input("Scale name must not be empty"));
        }
        self.ctx.registry_mut().register_scale(self.scale.clone())?;
        Ok(self.scale)
    }
}
