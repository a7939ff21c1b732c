/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::attributes::{flatten_values, single_value};
use crate::error::{Result, VegaBuilderError};
use crate::field::{resolve_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::{check_pair, TransformSpecTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordcloudTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Value>,

    #[serde(alias = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Value>,

    #[serde(alias = "fontStyle", skip_serializing_if = "Option::is_none")]
    pub font_style: Option<Value>,

    #[serde(alias = "fontWeight", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,

    /// A field name, or `{"random": [angles]}` / `{"alternate": [angles]}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Value>,
}

fn check_rotate(rotate: &Value) -> Result<()> {
    match rotate {
        Value::String(_) => Ok(()),
        Value::Object(rotate) => {
            single_value("rotate", rotate.iter().collect::<Vec<_>>(), |(mode, angles)| {
                if mode.as_str() != "random" && mode.as_str() != "alternate" {
                    return Err(VegaBuilderError::invalid_input(format!(
                        "Rotate mode must be random or alternate, received {mode}"
                    )));
                }
                if !angles.is_array() {
                    return Err(VegaBuilderError::invalid_input(
                        "Rotate angles must be a list of numbers",
                    ));
                }
                if flatten_values([angles.clone()]).iter().all(Value::is_number) {
                    Ok(())
                } else {
                    Err(VegaBuilderError::invalid_input(
                        "Rotate angles must be a list of numbers",
                    ))
                }
            })
        }
        other => Err(VegaBuilderError::invalid_input(format!(
            "Rotate must be a field or a rotation mode, received {other}"
        ))),
    }
}

impl TransformSpecTrait for WordcloudTransformSpec {
    fn check(&self) -> Result<()> {
        check_pair("size", &self.size)?;
        if let Some(rotate) = &self.rotate {
            check_rotate(rotate)?;
        }
        Ok(())
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["x", "y", "font", "font_size", "angle"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.text = self.text.as_ref().map(|f| resolve_field(f, extra));
        Ok(())
    }
}
