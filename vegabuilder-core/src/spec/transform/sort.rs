/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::field::{resolve_sort_field, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use crate::spec::values::StringOrStringList;
use serde::{Deserialize, Serialize};

/// Sorts by one or more fields. A leading `-` sorts descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortTransformSpec {
    pub by: StringOrStringList,
}

impl TransformSpecTrait for SortTransformSpec {
    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.by = self.by.map(|f| resolve_sort_field(f, extra));
        Ok(())
    }
}
