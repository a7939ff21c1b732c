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

/// Maps each record to an array of field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayTransformSpec {
    pub fields: Vec<String>,
}

impl TransformSpecTrait for ArrayTransformSpec {
    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.fields = self.fields.iter().map(|f| resolve_field(f, extra)).collect();
        Ok(())
    }
}
