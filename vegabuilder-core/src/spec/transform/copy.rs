/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::{Result, VegaBuilderError};
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

/// Copies properties of the object at `from` onto the record. The copied
/// names address that object, so they are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyTransformSpec {
    pub from: String,

    pub fields: Vec<String>,

    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_: Option<Vec<String>>,
}

impl TransformSpecTrait for CopyTransformSpec {
    fn check(&self) -> Result<()> {
        match &self.as_ {
            Some(as_) if as_.len() != self.fields.len() => {
                Err(VegaBuilderError::invalid_input(format!(
                    "Copy transform must have as many output names as fields: {} fields, {} names",
                    self.fields.len(),
                    as_.len()
                )))
            }
            _ => Ok(()),
        }
    }

    fn extra_fields(&self) -> Vec<String> {
        self.as_.clone().unwrap_or_else(|| self.fields.clone())
    }
}
