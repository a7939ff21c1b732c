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
use crate::field::{resolve_field, resolve_sort_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::{check_pair, TransformSpecTrait};
use crate::spec::values::StringOrStringList;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreemapTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<TreemapPadding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<StringOrStringList>,
}

/// One padding for every side, or `[top, right, bottom, left]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreemapPadding {
    Uniform(f64),
    Sides(Vec<f64>),
}

impl TransformSpecTrait for TreemapTransformSpec {
    fn check(&self) -> Result<()> {
        check_pair("size", &self.size)?;
        if let Some(TreemapPadding::Sides(sides)) = &self.padding {
            exact_arity("padding", sides, 4)?;
        }
        Ok(())
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["x", "y", "width", "height"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.value = self.value.as_ref().map(|f| resolve_field(f, extra));
        self.sort = self
            .sort
            .as_ref()
            .map(|sort| sort.map(|f| resolve_sort_field(f, extra)));
        Ok(())
    }
}
