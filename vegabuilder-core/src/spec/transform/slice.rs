/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::attributes::exact_arity;
use crate::error::Result;
use crate::field::{resolve_field, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceTransformSpec {
    pub by: SliceBy,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliceBy {
    Index(f64),
    Range(Vec<f64>),
    Op(SliceOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceOp {
    Min,
    Max,
    Median,
}

impl TransformSpecTrait for SliceTransformSpec {
    fn check(&self) -> Result<()> {
        match &self.by {
            SliceBy::Range(range) => exact_arity("by", range, 2),
            _ => Ok(()),
        }
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.field = self.field.as_ref().map(|f| resolve_field(f, extra));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::spec::transform::{TransformKind, TransformSpec};
    use serde_json::json;

    #[test]
    fn test_slice_by_shapes() {
        for by in [json!(3), json!([0, 10]), json!("median")] {
            assert!(TransformSpec::from_properties(TransformKind::Slice, json!({"by": by})).is_ok());
        }
        assert!(
            TransformSpec::from_properties(TransformKind::Slice, json!({"by": [0, 1, 2]})).is_err()
        );
        assert!(TransformSpec::from_properties(TransformKind::Slice, json!({"by": "mode"})).is_err());
    }
}
