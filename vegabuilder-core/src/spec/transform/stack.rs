/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::field::{resolve_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackTransformSpec {
    pub point: String,

    pub height: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<StackOffset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<StackOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOffset {
    Zero,
    Silhouette,
    Wiggle,
    Expand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackOrder {
    Default,
    Reverse,
    InsideOut,
}

impl TransformSpecTrait for StackTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["y", "y2"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.point = resolve_field(&self.point, extra);
        self.height = resolve_field(&self.height, extra);
        Ok(())
    }
}
