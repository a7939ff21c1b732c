/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::attributes::{Attribute, Flag, Serializable};
use crate::error::{Result, ResultWithContext};
use crate::field::{resolve_field, ExtraFields};
use crate::registry::Registry;
use crate::spec::values::ScaleReference;
use serde_json::Value;

/// Resolved specification of one visual property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRef {
    pub value: Option<Value>,
    pub field: Option<String>,
    pub scale: Option<String>,
    pub mult: Option<f64>,
    pub offset: Option<f64>,
    pub band: Flag,
    pub group: Option<String>,
}

impl Serializable for ValueRef {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("value".to_string(), Attribute::value(self.value.clone())),
            ("field".to_string(), Attribute::value(self.field.clone())),
            ("scale".to_string(), Attribute::value(self.scale.clone())),
            ("mult".to_string(), Attribute::value(self.mult)),
            ("offset".to_string(), Attribute::value(self.offset)),
            ("band".to_string(), self.band.attribute()),
            ("group".to_string(), Attribute::value(self.group.clone())),
        ]
    }
}

/// Unresolved value reference. Plain values convert into a constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRefSpec {
    value: Option<Value>,
    field: Option<String>,
    scale: Option<ScaleReference>,
    mult: Option<Value>,
    offset: Option<Value>,
    band: Flag,
    group: Option<String>,
}

impl ValueRefSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<V: Into<Value>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn scale<S: Into<ScaleReference>>(mut self, scale: S) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn mult<V: Into<Value>>(mut self, mult: V) -> Self {
        self.mult = Some(mult.into());
        self
    }

    pub fn offset<V: Into<Value>>(mut self, offset: V) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Use the band width of the scale rather than a position
    pub fn band(mut self) -> Self {
        self.band.set();
        self
    }

    /// Read a property of the enclosing group mark, such as `width`
    pub fn group(mut self, property: &str) -> Self {
        self.group = Some(property.to_string());
        self
    }

    /// Resolve the field against the mark's data context and check the scale
    /// is registered
    pub fn resolve(&self, registry: &Registry, extra: &ExtraFields) -> Result<ValueRef> {
        let scale = match &self.scale {
            Some(ScaleReference::Name(name)) => Some(registry.expect_scale(name)?.name.clone()),
            Some(ScaleReference::Object(name)) => Some(name.clone()),
            None => None,
        };
        Ok(ValueRef {
            value: self.value.clone(),
            field: self.field.as_ref().map(|field| resolve_field(field, extra)),
            scale,
            mult: numeric("mult", &self.mult)?,
            offset: numeric("offset", &self.offset)?,
            band: self.band,
            group: self.group.clone(),
        })
    }
}

fn numeric(property: &str, value: &Option<Value>) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .with_context(|| format!("Property {property} must be numeric, received {value}")),
    }
}

impl From<Value> for ValueRefSpec {
    fn from(value: Value) -> Self {
        Self::new().value(value)
    }
}

impl From<&str> for ValueRefSpec {
    fn from(value: &str) -> Self {
        Self::new().value(value)
    }
}

impl From<String> for ValueRefSpec {
    fn from(value: String) -> Self {
        Self::new().value(value)
    }
}

impl From<f64> for ValueRefSpec {
    fn from(value: f64) -> Self {
        Self::new().value(value)
    }
}

impl From<i64> for ValueRefSpec {
    fn from(value: i64) -> Self {
        Self::new().value(value)
    }
}

impl From<i32> for ValueRefSpec {
    fn from(value: i32) -> Self {
        Self::new().value(value)
    }
}

impl From<bool> for ValueRefSpec {
    fn from(value: bool) -> Self {
        Self::new().value(value)
    }
}

impl From<&ValueRefSpec> for ValueRefSpec {
    fn from(spec: &ValueRefSpec) -> Self {
        spec.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::collect_attributes;
    use crate::spec::scale::ScaleType;
    use crate::BuildContext;
    use serde_json::json;

    #[test]
    fn test_resolve_field_and_scale() {
        let ctx = BuildContext::new();
        let x = ctx.scale("x", ScaleType::Linear).build().unwrap();
        let extra = ExtraFields::structural();
        let value_ref = ValueRefSpec::new()
            .scale(&x)
            .field("price")
            .offset(-1)
            .band()
            .resolve(&ctx.registry(), &extra)
            .unwrap();
        assert_eq!(
            collect_attributes(&value_ref),
            json!({"field": "data.price", "scale": "x", "offset": -1.0, "band": true})
        );

        let by_name = ValueRefSpec::new().scale("x").resolve(&ctx.registry(), &extra);
        assert!(by_name.is_ok());
        let missing = ValueRefSpec::new().scale("y").resolve(&ctx.registry(), &extra);
        assert!(missing.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_mult_must_be_numeric() {
        let ctx = BuildContext::new();
        let err = ValueRefSpec::new()
            .mult("twice")
            .resolve(&ctx.registry(), &ExtraFields::new())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_constants() {
        let ctx = BuildContext::new();
        let value_ref = ValueRefSpec::from("steelblue")
            .resolve(&ctx.registry(), &ExtraFields::new())
            .unwrap();
        assert_eq!(collect_attributes(&value_ref), json!({"value": "steelblue"}));
    }
}
