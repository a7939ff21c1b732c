/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Named entity registry scoped to one [`BuildContext`](crate::context::BuildContext).
use crate::error::{Result, VegaBuilderError};
use crate::spec::axis::Axis;
use crate::spec::data::Data;
use crate::spec::mark::Mark;
use crate::spec::scale::Scale;
use crate::spec::transform::TransformSpec;
use log::debug;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Data,
    Scale,
    Mark,
    Transform,
    Axis,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Data => "Data",
            EntityKind::Scale => "Scale",
            EntityKind::Mark => "Mark",
            EntityKind::Transform => "Transform",
            EntityKind::Axis => "Axis",
        };
        write!(f, "{name}")
    }
}

/// Append-only entity lists. Data, Scale and Mark names are unique.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    data: Vec<Data>,
    scales: Vec<Scale>,
    marks: Vec<Mark>,
    transforms: Vec<TransformSpec>,
    axes: Vec<Axis>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_data(&mut self, data: Data) -> Result<()> {
        self.check_unique(EntityKind::Data, &data.name)?;
        debug!("Registered Data {}", data.name);
        self.data.push(data);
        Ok(())
    }

    pub fn register_scale(&mut self, scale: Scale) -> Result<()> {
        self.check_unique(EntityKind::Scale, &scale.name)?;
        debug!("Registered Scale {}", scale.name);
        self.scales.push(scale);
        Ok(())
    }

    /// Unnamed marks are always accepted
    pub fn register_mark(&mut self, mark: Mark) -> Result<()> {
        if let Some(name) = &mark.name {
            self.check_unique(EntityKind::Mark, name)?;
        }
        debug!(
            "Registered {} Mark {}",
            mark.type_.as_str(),
            mark.name.as_deref().unwrap_or("<unnamed>")
        );
        self.marks.push(mark);
        Ok(())
    }

    pub fn register_transform(&mut self, transform: TransformSpec) {
        debug!("Registered {} transform", transform.kind().as_str());
        self.transforms.push(transform);
    }

    pub fn register_axis(&mut self, axis: Axis) {
        debug!("Registered {} axis on scale {}", axis.type_.as_str(), axis.scale);
        self.axes.push(axis);
    }

    fn check_unique(&self, kind: EntityKind, name: &str) -> Result<()> {
        if self.count(kind, name) > 0 {
            Err(VegaBuilderError::invalid_input(format!(
                "Duplicate {kind} name: {name}"
            )))
        } else {
            Ok(())
        }
    }

    pub fn find_data(&self, name: &str) -> Option<&Data> {
        self.data.iter().find(|data| data.name == name)
    }

    pub fn find_scale(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|scale| scale.name == name)
    }

    pub fn find_mark(&self, name: &str) -> Option<&Mark> {
        self.marks
            .iter()
            .find(|mark| mark.name.as_deref() == Some(name))
    }

    /// Number of registered entities of `kind` carrying `name`. Transforms
    /// and axes are anonymous and never match.
    pub fn count(&self, kind: EntityKind, name: &str) -> usize {
        match kind {
            EntityKind::Data => self.data.iter().filter(|d| d.name == name).count(),
            EntityKind::Scale => self.scales.iter().filter(|s| s.name == name).count(),
            EntityKind::Mark => self
                .marks
                .iter()
                .filter(|m| m.name.as_deref() == Some(name))
                .count(),
            EntityKind::Transform | EntityKind::Axis => 0,
        }
    }

    pub fn is_duplicate_name(&self, kind: EntityKind, name: &str) -> bool {
        self.count(kind, name) >= 2
    }

    pub fn data(&self) -> &[Data] {
        &self.data
    }

    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn transforms(&self) -> &[TransformSpec] {
        &self.transforms
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Look up a registered Data by name, raising when it is missing
    pub fn expect_data(&self, name: &str) -> Result<&Data> {
        self.find_data(name).ok_or_else(|| {
            VegaBuilderError::invalid_input(format!("No Data registered with name: {name}"))
        })
    }

    /// Look up a registered Scale by name, raising when it is missing
    pub fn expect_scale(&self, name: &str) -> Result<&Scale> {
        self.find_scale(name).ok_or_else(|| {
            VegaBuilderError::invalid_input(format!("No Scale registered with name: {name}"))
        })
    }
}
