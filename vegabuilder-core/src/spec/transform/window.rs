/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::field::synthetic_fields;
use crate::spec::transform::TransformSpecTrait;
use serde::{Deserialize, Serialize};

/// Groups consecutive records into sliding windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
}

impl TransformSpecTrait for WindowTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["key", "values"])
    }
}
