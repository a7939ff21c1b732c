/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::field::{resolve_field, resolve_sort_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::TransformSpecTrait;
use crate::spec::values::StringOrStringList;
use serde::{Deserialize, Serialize};

/// Groups records by key fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacetTransformSpec {
    pub keys: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<StringOrStringList>,
}

impl TransformSpecTrait for FacetTransformSpec {
    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["key", "keys", "values"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.keys = self.keys.iter().map(|f| resolve_field(f, extra)).collect();
        self.sort = self
            .sort
            .as_ref()
            .map(|sort| sort.map(|f| resolve_sort_field(f, extra)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{resolve_qualified, ExtraFields};
    use crate::registry::Registry;
    use crate::spec::transform::{TransformKind, TransformSpec};
    use serde_json::json;

    #[test]
    fn test_facet_fields() {
        let mut facet = TransformSpec::from_properties(
            TransformKind::Facet,
            json!({"keys": ["category"], "sort": "-count"}),
        )
        .unwrap();
        let downstream = facet
            .attach(&ExtraFields::structural(), &Registry::new())
            .unwrap();
        assert_eq!(
            serde_json::to_value(&facet).unwrap(),
            json!({"type": "facet", "keys": ["data.category"], "sort": "-data.count"})
        );
        assert_eq!(resolve_qualified("table.key", &downstream), "key");
        assert_eq!(resolve_qualified("table.values", &downstream), "values");
    }
}
