/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::spec::transform::{check_datum_expr, TransformSpecTrait};
use serde::{Deserialize, Serialize};

/// Writes the value of `expr` to `field` on every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaTransformSpec {
    pub field: String,

    pub expr: String,
}

impl TransformSpecTrait for FormulaTransformSpec {
    fn check(&self) -> Result<()> {
        check_datum_expr("expr", &self.expr)
    }

    fn extra_fields(&self) -> Vec<String> {
        vec![self.field.clone()]
    }
}
