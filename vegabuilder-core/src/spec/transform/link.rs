/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::{Result, VegaBuilderError};
use crate::field::{resolve_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

/// Computes a path between the source and target nodes of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<LinkShape>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkShape {
    #[serde(rename = "line")]
    Line,

    #[serde(rename = "curve")]
    Curve,

    #[serde(rename = "diagonal")]
    Diagonal,

    #[serde(rename = "diagonalX")]
    DiagonalX,

    #[serde(rename = "diagonalY")]
    DiagonalY,
}

impl TransformSpecTrait for LinkTransformSpec {
    fn check(&self) -> Result<()> {
        match self.tension {
            Some(tension) if !(0.0..=1.0).contains(&tension) => {
                Err(VegaBuilderError::invalid_input(format!(
                    "Link tension must be between 0 and 1, received {tension}"
                )))
            }
            _ => Ok(()),
        }
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["path"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.source = self.source.as_ref().map(|f| resolve_field(f, extra));
        self.target = self.target.as_ref().map(|f| resolve_field(f, extra));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::spec::transform::{TransformKind, TransformSpec};
    use rstest::rstest;
    use serde_json::json;

    #[rstest(
        shape,
        valid,
        case("line", true),
        case("diagonalX", true),
        case("diagonal_x", false),
        case("zigzag", false)
    )]
    fn test_link_shape(shape: &str, valid: bool) {
        let link = TransformSpec::from_properties(TransformKind::Link, json!({"shape": shape}));
        assert_eq!(link.is_ok(), valid);
    }

    #[test]
    fn test_link_tension_range() {
        assert!(TransformSpec::from_properties(TransformKind::Link, json!({"tension": 0.5})).is_ok());
        assert!(TransformSpec::from_properties(TransformKind::Link, json!({"tension": 1.5})).is_err());
    }
}
