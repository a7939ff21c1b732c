/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Cartographic projections of longitude/latitude records and GeoJSON
//! features. Projection math happens downstream; only the parameters are
//! checked here.
use crate::error::Result;
use crate::field::{resolve_field, synthetic_fields, ExtraFields};
use crate::registry::Registry;
use crate::spec::transform::{check_pair, TransformSpecTrait};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    #[serde(alias = "clipAngle", skip_serializing_if = "Option::is_none")]
    pub clip_angle: Option<f64>,

    pub lon: String,

    pub lat: String,
}

impl TransformSpecTrait for GeoTransformSpec {
    fn check(&self) -> Result<()> {
        check_pair("center", &self.center)?;
        check_pair("translate", &self.translate)
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["x", "y"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.lon = resolve_field(&self.lon, extra);
        self.lat = resolve_field(&self.lat, extra);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeopathTransformSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    #[serde(alias = "clipAngle", skip_serializing_if = "Option::is_none")]
    pub clip_angle: Option<f64>,

    /// Field holding the GeoJSON feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TransformSpecTrait for GeopathTransformSpec {
    fn check(&self) -> Result<()> {
        check_pair("center", &self.center)?;
        check_pair("translate", &self.translate)
    }

    fn extra_fields(&self) -> Vec<String> {
        synthetic_fields(&["path"])
    }

    fn resolve_fields(&mut self, extra: &ExtraFields, _registry: &Registry) -> Result<()> {
        self.value = self.value.as_ref().map(|f| resolve_field(f, extra));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::spec::transform::{TransformKind, TransformSpec};
    use serde_json::json;

    #[test]
    fn test_geo_requires_coordinates() {
        assert!(TransformSpec::from_properties(TransformKind::Geo, json!({"lon": "lon"})).is_err());
        assert!(TransformSpec::from_properties(
            TransformKind::Geo,
            json!({"projection": "albersUsa", "lon": "lon", "lat": "lat", "translate": [400, 300]}),
        )
        .is_ok());
        assert!(TransformSpec::from_properties(
            TransformKind::Geo,
            json!({"projection": "albersUsa", "lon": "lon", "lat": "lat", "translate": [400, 300, 1]}),
        )
        .is_err());
    }
}
