/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::config::BuilderConfig;
use crate::error::{Result, ResultWithContext};
use crate::registry::Registry;
use crate::spec::axis::{AxisBuilder, AxisType};
use crate::spec::data::DataBuilder;
use crate::spec::mark::{MarkBuilder, MarkType};
use crate::spec::scale::{ScaleBuilder, ScaleType};
use crate::spec::transform::{TransformKind, TransformSpec};
use crate::spec::visualization::VisualizationBuilder;
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};

/// A chart-building session. Every entity built through the context is
/// registered with it, so names only collide within one session.
#[derive(Debug, Default)]
pub struct BuildContext {
    registry: RefCell<Registry>,
    config: BuilderConfig,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            registry: Default::default(),
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn registry(&self) -> Ref<'_, Registry> {
        self.registry.borrow()
    }

    pub(crate) fn registry_mut(&self) -> RefMut<'_, Registry> {
        self.registry.borrow_mut()
    }

    pub fn data(&self, name: &str) -> DataBuilder<'_> {
        DataBuilder::new(self, name)
    }

    pub fn scale(&self, name: &str, type_: ScaleType) -> ScaleBuilder<'_> {
        ScaleBuilder::new(self, name, type_)
    }

    /// Build a transform from its properties, validate it against the
    /// entities registered so far, and register it
    pub fn transform(&self, kind: TransformKind, properties: Value) -> Result<TransformSpec> {
        let transform = TransformSpec::from_properties(kind, properties)?;
        transform
            .validate(&self.registry())
            .with_context(|| format!("Invalid {} transform", kind.as_str()))?;
        self.registry_mut().register_transform(transform.clone());
        Ok(transform)
    }

    pub fn mark(&self, type_: MarkType) -> MarkBuilder<'_> {
        MarkBuilder::new(self, type_)
    }

    pub fn axis(&self, type_: AxisType) -> AxisBuilder<'_> {
        AxisBuilder::new(self, type_)
    }

    pub fn x_axis(&self) -> AxisBuilder<'_> {
        self.axis(AxisType::X)
    }

    pub fn y_axis(&self) -> AxisBuilder<'_> {
        self.axis(AxisType::Y)
    }

    pub fn visualization(&self) -> VisualizationBuilder<'_> {
        VisualizationBuilder::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contexts_are_isolated() {
        let first = BuildContext::new();
        let second = BuildContext::new();
        first.data("table").build().unwrap();
        second.data("table").build().unwrap();
        assert!(first.data("table").build().is_err());
        assert_eq!(first.registry().data().len(), 1);
        assert_eq!(second.registry().data().len(), 1);
    }

    #[test]
    fn test_transform_is_registered() {
        let ctx = BuildContext::new();
        let fold = ctx
            .transform(TransformKind::Fold, json!({"fields": ["a", "b"]}))
            .unwrap();
        assert_eq!(fold.kind(), TransformKind::Fold);
        assert_eq!(ctx.registry().transforms().len(), 1);
        assert!(ctx
            .transform(TransformKind::Fold, json!({"fields": ["a"], "bogus": 1}))
            .is_err());
        assert_eq!(ctx.registry().transforms().len(), 1);
    }
}
