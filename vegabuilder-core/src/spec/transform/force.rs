/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::field::synthetic_fields;
use crate::registry::Registry;
use crate::spec::transform::{check_pair, check_registered_data, TransformSpecTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Force-directed graph layout. Records are nodes, `links` names the Data
/// holding the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForceTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,

    /// Number or field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge: Option<Value>,

    #[serde(alias = "linkDistance", skip_serializing_if = "Option::is_none")]
    pub link_distance: Option<f64>,

    #[serde(alias = "linkStrength", skip_serializing_if = "Option::is_none")]
    pub link_strength: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub friction: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl TransformSpecTrait for ForceTransformSpec {
    fn check(&self) -> Result<()> {
        check_pair("size", &self.size)
    }

    fn validate(&self, registry: &Registry) -> Result<()> {
        match &self.links {
            Some(links) => check_registered_data(registry, "links", links),
            None => Ok(()),
        }
    }

    fn referenced_data(&self) -> Vec<String> {
        self.links.iter().cloned().collect()
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["x", "y"])
    }
}
