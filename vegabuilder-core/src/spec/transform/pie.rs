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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PieTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
}

impl TransformSpecTrait for PieTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["start_angle", "end_angle"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.value = self.value.as_ref().map(|f| resolve_field(f, extra));
        Ok(())
    }
}
