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
pub struct StatsTransformSpec {
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign: Option<bool>,
}

impl TransformSpecTrait for StatsTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&[
            "count", "min", "max", "sum", "mean", "variance", "stdev", "median",
        ])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.value = resolve_field(&self.value, extra);
        Ok(())
    }
}
