/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::attributes::{Attribute, Serializable};
use crate::context::BuildContext;
use crate::error::{Result, ResultWithContext, VegaBuilderError};
use crate::field::ExtraFields;
use crate::spec::transform::TransformSpec;
use crate::spec::values::DataReference;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::{ParseError, Url};

lazy_static! {
    /// Base used to check relative URLs
    static ref RELATIVE_URL_BASE: Url = Url::parse("file:///").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub name: String,
    pub format: Option<DataFormat>,
    pub values: Option<Value>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub transform: Vec<TransformSpec>,
    extra_fields: ExtraFields,
}

impl Data {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            format: None,
            values: None,
            source: None,
            url: None,
            transform: Vec::new(),
            extra_fields: ExtraFields::structural(),
        }
    }

    /// Fields available on the records of this Data: the structural fields,
    /// then those added along the source chain and by its own transforms
    pub fn extra_fields(&self) -> &ExtraFields {
        &self.extra_fields
    }

    /// Whether the inline values are a list of scalars rather than records
    pub fn is_flat(&self) -> bool {
        match &self.values {
            Some(Value::Array(items)) => {
                !items.is_empty() && items.iter().all(|item| !item.is_object())
            }
            _ => false,
        }
    }
}

impl Serializable for Data {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("name".to_string(), Attribute::Value(Value::String(self.name.clone()))),
            ("format".to_string(), Attribute::node(self.format.as_ref())),
            ("values".to_string(), Attribute::value(self.values.clone())),
            ("source".to_string(), Attribute::value(self.source.clone())),
            ("url".to_string(), Attribute::value(self.url.clone())),
            ("transform".to_string(), Attribute::nodes(&self.transform)),
        ]
    }
}

pub struct DataBuilder<'a> {
    ctx: &'a BuildContext,
    data: Data,
}

impl<'a> DataBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, name: &str) -> Self {
        Self {
            ctx,
            data: Data::new(name),
        }
    }

    /// Inline values, a list of records or a single object
    pub fn values(mut self, values: Value) -> Result<Self> {
        if !(values.is_array() || values.is_object()) {
            return Err(VegaBuilderError::invalid_input(format!(
                "Values of Data {} must be a list or an object, received {values}",
                self.data.name
            )));
        }
        self.data.values = Some(values);
        Ok(self)
    }

    /// Inline values given as JSON text
    pub fn values_str(self, values: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(values)
            .map_err(|err| VegaBuilderError::invalid_input(err.to_string()))
            .with_context(|| format!("Malformed values for Data {}", self.data.name))?;
        self.values(parsed)
    }

    /// Derive from a registered Data, inheriting its fields. Must precede
    /// any transform, since transforms resolve against the source's fields.
    pub fn source<R: Into<DataReference>>(mut self, source: R) -> Result<Self> {
        if !self.data.transform.is_empty() {
            return Err(VegaBuilderError::invalid_input(format!(
                "Source of Data {} must be set before its transforms",
                self.data.name
            )));
        }
        let source = source.into();
        let source_fields = self
            .ctx
            .registry()
            .expect_data(source.name())?
            .extra_fields()
            .clone();
        self.data.extra_fields = ExtraFields::structural().union(&source_fields);
        self.data.source = Some(source.0);
        Ok(self)
    }

    pub fn url(mut self, url: &str) -> Result<Self> {
        validate_url(url).with_context(|| format!("Invalid URL for Data {}", self.data.name))?;
        self.data.url = Some(url.to_string());
        Ok(self)
    }

    pub fn format(mut self, format: DataFormat) -> Self {
        self.data.format = Some(format);
        self
    }

    /// Attach a transform. Its field properties resolve against the fields
    /// available after the transforms attached so far.
    pub fn transform(mut self, mut transform: TransformSpec) -> Result<Self> {
        let downstream = transform
            .attach(&self.data.extra_fields, &self.ctx.registry())
            .with_context(|| format!("Failed to attach transform to Data {}", self.data.name))?;
        self.data.extra_fields = downstream;
        self.data.transform.push(transform);
        Ok(self)
    }

    pub fn transforms<I: IntoIterator<Item = TransformSpec>>(self, transforms: I) -> Result<Self> {
        transforms
            .into_iter()
            .try_fold(self, |builder, transform| builder.transform(transform))
    }

    pub fn build(self) -> Result<Data> {
        if self.data.name.trim().is_empty() {
            return Err(VegaBuilderError::invalid_input("Data name must not be empty"));
        }
        self.ctx.registry_mut().register_data(self.data.clone())?;
        Ok(self.data)
    }
}

/// Accept absolute URLs and relative references
fn validate_url(url: &str) -> Result<()> {
    match Url::parse(url) {
        Ok(_) => Ok(()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            RELATIVE_URL_BASE.join(url)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    Json,
    Csv,
    Tsv,
    TopoJson,
    TreeJson,
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Csv => "csv",
            FormatType::Tsv => "tsv",
            FormatType::TopoJson => "topojson",
            FormatType::TreeJson => "treejson",
        }
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = VegaBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "json" => FormatType::Json,
            "csv" => FormatType::Csv,
            "tsv" => FormatType::Tsv,
            "topojson" => FormatType::TopoJson,
            "treejson" => FormatType::TreeJson,
            _ => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Unknown data format: {s}"
                )))
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseType {
    Number,
    Boolean,
    Date,
}

impl ParseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseType::Number => "number",
            ParseType::Boolean => "boolean",
            ParseType::Date => "date",
        }
    }
}

/// How the records at a Data's url are decoded. Options only apply to the
/// format types that understand them.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFormat {
    pub type_: FormatType,
    pub parse: IndexMap<String, ParseType>,
    pub property: Option<String>,
    pub feature: Option<String>,
    pub mesh: Option<String>,
    pub children: Option<String>,
}

impl DataFormat {
    pub fn new(type_: FormatType) -> Self {
        Self {
            type_,
            parse: IndexMap::new(),
            property: None,
            feature: None,
            mesh: None,
            children: None,
        }
    }

    pub fn json() -> Self {
        Self::new(FormatType::Json)
    }

    pub fn csv() -> Self {
        Self::new(FormatType::Csv)
    }

    pub fn tsv() -> Self {
        Self::new(FormatType::Tsv)
    }

    pub fn topojson() -> Self {
        Self::new(FormatType::TopoJson)
    }

    pub fn treejson() -> Self {
        Self::new(FormatType::TreeJson)
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(FormatType::from_str(tag)?))
    }

    fn check_supported(&self, option: &str, supported: &[FormatType]) -> Result<()> {
        if supported.contains(&self.type_) {
            Ok(())
        } else {
            Err(VegaBuilderError::invalid_input(format!(
                "Format {} does not support {option}",
                self.type_
            )))
        }
    }

    pub fn parse(mut self, field: &str, parse_type: ParseType) -> Result<Self> {
        self.check_supported(
            "parse",
            &[
                FormatType::Json,
                FormatType::Csv,
                FormatType::Tsv,
                FormatType::TreeJson,
            ],
        )?;
        self.parse.insert(field.to_string(), parse_type);
        Ok(self)
    }

    fn parse_all<I, S>(self, fields: I, parse_type: ParseType) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fields
            .into_iter()
            .try_fold(self, |format, field| format.parse(field.as_ref(), parse_type))
    }

    pub fn date<I, S>(self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_all(fields, ParseType::Date)
    }

    pub fn number<I, S>(self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_all(fields, ParseType::Number)
    }

    pub fn boolean<I, S>(self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_all(fields, ParseType::Boolean)
    }

    pub fn property(mut self, property: &str) -> Result<Self> {
        self.check_supported("property", &[FormatType::Json])?;
        self.property = Some(property.to_string());
        Ok(self)
    }

    pub fn feature(mut self, feature: &str) -> Result<Self> {
        self.check_supported("feature", &[FormatType::TopoJson])?;
        self.feature = Some(feature.to_string());
        Ok(self)
    }

    pub fn mesh(mut self, mesh: &str) -> Result<Self> {
        self.check_supported("mesh", &[FormatType::TopoJson])?;
        self.mesh = Some(mesh.to_string());
        Ok(self)
    }

    pub fn children(mut self, children: &str) -> Result<Self> {
        self.check_supported("children", &[FormatType::TreeJson])?;
        self.children = Some(children.to_string());
        Ok(self)
    }
}

impl Serializable for DataFormat {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        // Parse keys are field names and are emitted as given
        let parse = if self.parse.is_empty() {
            Attribute::Undefined
        } else {
            let parse: Map<String, Value> = self
                .parse
                .iter()
                .map(|(field, parse_type)| {
                    (field.clone(), Value::String(parse_type.as_str().to_string()))
                })
                .collect();
            Attribute::Value(Value::Object(parse))
        };
        vec![
            (
                "type".to_string(),
                Attribute::Value(Value::String(self.type_.as_str().to_string())),
            ),
            ("parse".to_string(), parse),
            ("property".to_string(), Attribute::value(self.property.clone())),
            ("feature".to_string(), Attribute::value(self.feature.clone())),
            ("mesh".to_string(), Attribute::value(self.mesh.clone())),
            ("children".to_string(), Attribute::value(self.children.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::collect_attributes;
    use crate::spec::transform::TransformKind;
    use serde_json::json;

    #[test]
    fn test_values_literal() {
        let ctx = BuildContext::new();
        let table = ctx
            .data("table")
            .values_str(r#"[{"x": 1, "y": 2}, {"x": 2, "y": 3}]"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(table.values, Some(json!([{"x": 1, "y": 2}, {"x": 2, "y": 3}])));
        assert!(!table.is_flat());

        let err = ctx.data("broken").values_str("[{\"x\": 1").err().unwrap();
        assert!(err.is_invalid_input());
        assert!(ctx.data("scalar").values(json!(3)).is_err());
    }

    #[test]
    fn test_flat_values() {
        let ctx = BuildContext::new();
        let letters = ctx.data("letters").values(json!(["a", "b"])).unwrap().build().unwrap();
        assert!(letters.is_flat());
    }

    #[test]
    fn test_url_validation() {
        let ctx = BuildContext::new();
        assert!(ctx.data("a").url("data/cars.json").is_ok());
        assert!(ctx.data("b").url("http://vega.github.io/data/cars.json").is_ok());
        let err = ctx.data("c").url("http://exa mple.com/cars.json").err().unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_source_must_be_registered() {
        let ctx = BuildContext::new();
        assert!(ctx.data("derived").source("table").is_err());
        let table = ctx.data("table").build().unwrap();
        let derived = ctx.data("derived").source(&table).unwrap().build().unwrap();
        assert_eq!(derived.source.as_deref(), Some("table"));
    }

    #[test]
    fn test_extra_fields_follow_source_chain() {
        let ctx = BuildContext::new();
        let stats = ctx
            .transform(TransformKind::Stats, json!({"value": "price"}))
            .unwrap();
        let table = ctx.data("table").transform(stats).unwrap().build().unwrap();
        let fold = ctx
            .transform(TransformKind::Fold, json!({"fields": ["mean", "price"]}))
            .unwrap();
        let derived = ctx
            .data("derived")
            .source(&table)
            .unwrap()
            .transform(fold)
            .unwrap()
            .build()
            .unwrap();
        assert!(derived.extra_fields().contains("mean"));
        assert!(derived.extra_fields().contains("key"));
        assert_eq!(
            collect_attributes(&derived)["transform"][0]["fields"],
            json!(["mean", "data.price"])
        );
    }

    #[test]
    fn test_source_after_transform_is_rejected() {
        let ctx = BuildContext::new();
        let stats = ctx
            .transform(TransformKind::Stats, json!({"value": "price"}))
            .unwrap();
        let table = ctx.data("table").transform(stats).unwrap().build().unwrap();
        let fold = ctx
            .transform(TransformKind::Fold, json!({"fields": ["mean"]}))
            .unwrap();
        let err = ctx
            .data("derived")
            .transform(fold)
            .unwrap()
            .source(&table)
            .err()
            .unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let ctx = BuildContext::new();
        assert!(ctx.data("  ").build().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_format_options_are_gated() {
        let format = DataFormat::csv().date(["born", "died"]).unwrap();
        assert_eq!(
            collect_attributes(&format),
            json!({"type": "csv", "parse": {"born": "date", "died": "date"}})
        );
        assert!(DataFormat::csv().property("values").is_err());
        assert!(DataFormat::topojson().feature("counties").is_ok());
        assert!(DataFormat::topojson().number(["rate"]).is_err());
        assert!(DataFormat::treejson().children("kids").is_ok());
        assert!(DataFormat::from_tag("xml").is_err());
    }
}
