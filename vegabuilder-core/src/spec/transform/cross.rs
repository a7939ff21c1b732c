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
use crate::spec::transform::{check_registered_data, TransformSpecTrait};
use serde::{Deserialize, Serialize};

/// Cross product of the records with themselves or with another Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<bool>,
}

impl TransformSpecTrait for CrossTransformSpec {
    fn validate(&self, registry: &Registry) -> Result<()> {
        if let Some(with) = &self.with {
            check_registered_data(registry, "with", with)?;
        }
        Ok(())
    }

    fn referenced_data(&self) -> Vec<String> {
        self.with.iter().cloned().collect()
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["a", "b"])
    }
}
