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
use crate::spec::transform::{check_registered_data, TransformSpecTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Joins the records of a secondary Data, positionally or by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZipTransformSpec {
    pub with: String,

    #[serde(rename = "as")]
    pub as_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(alias = "withKey", skip_serializing_if = "Option::is_none")]
    pub with_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl TransformSpecTrait for ZipTransformSpec {
    fn validate(&self, registry: &Registry) -> Result<()> {
        check_registered_data(registry, "with", &self.with)
    }

    fn referenced_data(&self) -> Vec<String> {
        vec![self.with.clone()]
    }

    fn extra_fields(&self) -> Vec<String> {
        vec![self.as_.clone()]
    }

    /// `with_key` names a field of the secondary Data and resolves in its
    /// context
    fn resolve_fields(&mut self, extra: &ExtraFields, registry: &Registry) -> Result<()> {
        self.key = self.key.as_ref().map(|f| resolve_field(f, extra));
        if let Some(with_key) = &self.with_key {
            let with_extra = registry.expect_data(&self.with)?.extra_fields();
            self.with_key = Some(resolve_field(with_key, with_extra));
        }
        Ok(())
    }
}
