/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::field::{resolve_field, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

const DEFAULT_OUTPUT: &str = "truncate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TruncateTransformSpec {
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<TruncatePosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ellipsis: Option<String>,

    #[serde(alias = "wordBreak", skip_serializing_if = "Option::is_none")]
    pub word_break: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncatePosition {
    Front,
    Middle,
    End,
}

impl TransformSpecTrait for TruncateTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        vec![self
            .output
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string())]
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.value = resolve_field(&self.value, extra);
        Ok(())
    }
}
