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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterTransformSpec {
    pub test: String,
}

impl TransformSpecTrait for FilterTransformSpec {
    fn check(&self) -> Result<()> {
        check_datum_expr("test", &self.test)
    }
}

#[cfg(test)]
mod tests {
    use crate::BuildContext;
    use crate::spec::transform::TransformKind;
    use serde_json::json;

    #[test]
    fn test_filter_requires_datum() {
        let ctx = BuildContext::new();
        assert!(ctx
            .transform(TransformKind::Filter, json!({"test": "d.data.y > 2"}))
            .is_ok());
        assert!(ctx
            .transform(TransformKind::Filter, json!({"test": "data.y > 2"}))
            .unwrap_err()
            .is_invalid_input());
    }
}
