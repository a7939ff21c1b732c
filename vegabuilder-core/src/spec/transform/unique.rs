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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniqueTransformSpec {
    pub field: String,

    #[serde(rename = "as")]
    pub as_: String,
}

impl TransformSpecTrait for UniqueTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        vec![self.as_.clone()]
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.field = resolve_field(&self.field, extra);
        Ok(())
    }
}
