/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::error::Result;
use crate::spec::axis::Axis;
use crate::spec::data::Data;
use crate::spec::mark::Mark;
use crate::spec::scale::Scale;
use crate::spec::value_ref::ValueRef;
use crate::spec::visualization::Visualization;
use itertools::Itertools;
use std::collections::HashSet;

/// Depth-first walk over a compiled visualization. `scope` holds the index
/// of each enclosing group mark.
pub trait VisualizationVisitor {
    fn visit_visualization(&mut self, _visualization: &Visualization) -> Result<()> {
        Ok(())
    }
    fn visit_data(&mut self, _data: &Data, _scope: &[u32]) -> Result<()> {
        Ok(())
    }
    fn visit_scale(&mut self, _scale: &Scale, _scope: &[u32]) -> Result<()> {
        Ok(())
    }
    fn visit_axis(&mut self, _axis: &Axis, _scope: &[u32]) -> Result<()> {
        Ok(())
    }
    fn visit_non_group_mark(&mut self, _mark: &Mark, _scope: &[u32]) -> Result<()> {
        Ok(())
    }
    fn visit_group_mark(&mut self, _mark: &Mark, _scope: &[u32]) -> Result<()> {
        Ok(())
    }
}

/// Collect the Data and Scale names a visualization defines and the names
/// its entities refer to. Data is global. A Scale is visible in the scope
/// that defines it and in every group nested within that scope.
#[derive(Clone, Debug, Default)]
pub struct CollectReferencesVisitor {
    pub data: HashSet<String>,
    pub scales: HashSet<(Vec<u32>, String)>,
    pub data_refs: Vec<String>,
    pub scale_refs: Vec<(Vec<u32>, String)>,
}

impl CollectReferencesVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn refer_data(&mut self, name: &str) {
        if !self.data_refs.iter().any(|r| r == name) {
            self.data_refs.push(name.to_string());
        }
    }

    fn refer_scale(&mut self, name: &str, scope: &[u32]) {
        if !self
            .scale_refs
            .iter()
            .any(|(s, r)| r == name && s.as_slice() == scope)
        {
            self.scale_refs.push((Vec::from(scope), name.to_string()));
        }
    }

    fn refer_value_ref(&mut self, value_ref: &ValueRef, scope: &[u32]) {
        if let Some(scale) = &value_ref.scale {
            self.refer_scale(scale, scope);
        }
    }

    fn visit_mark(&mut self, mark: &Mark, scope: &[u32]) {
        if let Some(from) = &mark.from {
            if let Some(data) = &from.data {
                self.refer_data(data);
            }
            for transform in &from.transform {
                for data in transform.referenced_data() {
                    self.refer_data(&data);
                }
            }
        }
        for property in mark.properties.iter() {
            for value_ref in property.value_refs() {
                self.refer_value_ref(value_ref, scope);
            }
        }
        if let Some(delay) = &mark.delay {
            self.refer_value_ref(delay, scope);
        }
    }

    /// Whether a Scale defined in `scope` or one of its ancestors has `name`
    pub fn is_scale_visible(&self, name: &str, scope: &[u32]) -> bool {
        (0..=scope.len()).any(|depth| {
            self.scales
                .contains(&(Vec::from(&scope[..depth]), name.to_string()))
        })
    }

    /// Referenced names missing from the visualization, in order of first
    /// reference
    pub fn dangling(&self) -> Vec<String> {
        let data = self
            .data_refs
            .iter()
            .filter(|name| !self.data.contains(*name))
            .map(|name| format!("Data {name}"));
        let scales = self
            .scale_refs
            .iter()
            .filter(|(scope, name)| !self.is_scale_visible(name, scope))
            .map(|(_, name)| format!("Scale {name}"))
            .unique();
        data.chain(scales).collect()
    }
}

impl VisualizationVisitor for CollectReferencesVisitor {
    fn visit_data(&mut self, data: &Data, _scope: &[u32]) -> Result<()> {
        self.data.insert(data.name.clone());
        if let Some(source) = &data.source {
            self.refer_data(source);
        }
        for transform in &data.transform {
            for name in transform.referenced_data() {
                self.refer_data(&name);
            }
        }
        Ok(())
    }

    fn visit_scale(&mut self, scale: &Scale, scope: &[u32]) -> Result<()> {
        self.scales.insert((Vec::from(scope), scale.name.clone()));
        for data_ref in scale.data_refs() {
            self.refer_data(&data_ref.data);
        }
        Ok(())
    }

    fn visit_axis(&mut self, axis: &Axis, scope: &[u32]) -> Result<()> {
        self.refer_scale(&axis.scale, scope);
        for property in axis.properties.values() {
            for value_ref in property.value_refs() {
                self.refer_value_ref(value_ref, scope);
            }
        }
        Ok(())
    }

    fn visit_non_group_mark(&mut self, mark: &Mark, scope: &[u32]) -> Result<()> {
        self.visit_mark(mark, scope);
        Ok(())
    }

    fn visit_group_mark(&mut self, mark: &Mark, scope: &[u32]) -> Result<()> {
        // A group's own properties are encoded by the scales around it
        let parent = &scope[..scope.len().saturating_sub(1)];
        self.visit_mark(mark, parent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_are_visible_in_nested_scopes() {
        let mut visitor = CollectReferencesVisitor::new();
        visitor.scales.insert((vec![], "x".to_string()));
        visitor.scales.insert((vec![1], "inner".to_string()));
        assert!(visitor.is_scale_visible("x", &[1, 0]));
        assert!(visitor.is_scale_visible("inner", &[1]));
        assert!(visitor.is_scale_visible("inner", &[1, 2]));
        assert!(!visitor.is_scale_visible("inner", &[]));
        assert!(!visitor.is_scale_visible("inner", &[0]));
    }
}
