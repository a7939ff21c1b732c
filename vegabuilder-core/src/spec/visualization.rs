/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! The root of a chart. Building a visualization applies the configured
//! defaults; serializing it is a plain walk over entities that were
//! validated when they were built.
use crate::attributes::{collect_attributes, Attribute, Serializable};
use crate::context::BuildContext;
use crate::error::{Result, VegaBuilderError};
use crate::spec::axis::Axis;
use crate::spec::data::Data;
use crate::spec::mark::Mark;
use crate::spec::scale::Scale;
use crate::spec::visitors::{CollectReferencesVisitor, VisualizationVisitor};
use log::{debug, warn};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Accepts `[width, height]` or `{"width": .., "height": ..}`
    pub fn from_value(value: &Value) -> Result<Self> {
        let (width, height) = match value {
            Value::Array(items) if items.len() == 2 => (items.first(), items.get(1)),
            Value::Object(map) => (map.get("width"), map.get("height")),
            _ => {
                return Err(VegaBuilderError::invalid_input(format!(
                    "Viewport must be [width, height] or an object with width and height, received {value}"
                )))
            }
        };
        Ok(Self {
            width: dimension("width", width)?,
            height: dimension("height", height)?,
        })
    }
}

fn dimension(name: &str, value: Option<&Value>) -> Result<u32> {
    value
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            VegaBuilderError::invalid_input(format!(
                "Viewport {name} must be a non-negative integer"
            ))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: i64,
    pub left: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Padding {
    pub fn uniform(padding: i64) -> Self {
        Self {
            top: padding,
            left: padding,
            right: padding,
            bottom: padding,
        }
    }

    /// Accepts a number or an object with all four sides
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::uniform).ok_or_else(|| {
                VegaBuilderError::invalid_input(format!("Padding must be an integer, received {n}"))
            }),
            Value::Object(map) => {
                let side = |name: &str| {
                    map.get(name).and_then(|v| v.as_i64()).ok_or_else(|| {
                        VegaBuilderError::invalid_input(format!(
                            "Padding requires an integer {name}"
                        ))
                    })
                };
                Ok(Self {
                    top: side("top")?,
                    left: side("left")?,
                    right: side("right")?,
                    bottom: side("bottom")?,
                })
            }
            other => Err(VegaBuilderError::invalid_input(format!(
                "Padding must be a number or an object, received {other}"
            ))),
        }
    }
}

impl From<i64> for Padding {
    fn from(padding: i64) -> Self {
        Self::uniform(padding)
    }
}

impl From<i32> for Padding {
    fn from(padding: i32) -> Self {
        Self::uniform(padding as i64)
    }
}

impl Serializable for Padding {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("top".to_string(), Attribute::Value(self.top.into())),
            ("left".to_string(), Attribute::Value(self.left.into())),
            ("right".to_string(), Attribute::Value(self.right.into())),
            ("bottom".to_string(), Attribute::Value(self.bottom.into())),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Compact,
    Pretty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
    pub viewport: Viewport,
    pub padding: Padding,
    pub data: Vec<Data>,
    pub scales: Vec<Scale>,
    pub marks: Vec<Mark>,
    pub axes: Vec<Axis>,
}

impl Visualization {
    pub fn walk(&self, visitor: &mut dyn VisualizationVisitor) -> Result<()> {
        visitor.visit_visualization(self)?;

        // Top-level with empty scope
        let scope: Vec<u32> = Vec::new();
        for data in &self.data {
            visitor.visit_data(data, &scope)?;
        }
        for scale in &self.scales {
            visitor.visit_scale(scale, &scope)?;
        }
        for axis in &self.axes {
            visitor.visit_axis(axis, &scope)?;
        }

        let mut group_index = 0;
        for mark in &self.marks {
            if mark.is_group() {
                let mut nested_scope = scope.clone();
                nested_scope.push(group_index);

                visitor.visit_group_mark(mark, &nested_scope)?;
                mark.walk(visitor, &nested_scope)?;
                group_index += 1;
            } else {
                visitor.visit_non_group_mark(mark, &scope)?;
            }
        }

        Ok(())
    }

    /// Data and scales referred to but not included, e.g. `"Scale y"`
    pub fn dangling_references(&self) -> Result<Vec<String>> {
        let mut visitor = CollectReferencesVisitor::new();
        self.walk(&mut visitor)?;
        Ok(visitor.dangling())
    }

    pub fn to_spec(&self) -> Value {
        collect_attributes(self)
    }

    pub fn generate_spec(&self, format: SpecFormat) -> Result<String> {
        let spec = self.to_spec();
        Ok(match format {
            SpecFormat::Compact => serde_json::to_string(&spec)?,
            SpecFormat::Pretty => serde_json::to_string_pretty(&spec)?,
        })
    }
}

impl Serializable for Visualization {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("name".to_string(), Attribute::value(self.name.clone())),
            ("width".to_string(), Attribute::Value(self.width.into())),
            ("height".to_string(), Attribute::Value(self.height.into())),
            (
                "viewport".to_string(),
                Attribute::Value(json!([self.viewport.width, self.viewport.height])),
            ),
            ("padding".to_string(), Attribute::Node(&self.padding)),
            ("data".to_string(), Attribute::nodes(&self.data)),
            ("scales".to_string(), Attribute::nodes(&self.scales)),
            ("marks".to_string(), Attribute::nodes(&self.marks)),
            ("axes".to_string(), Attribute::nodes(&self.axes)),
        ]
    }
}

impl Serialize for Visualization {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_spec().serialize(serializer)
    }
}

pub struct VisualizationBuilder<'a> {
    ctx: &'a BuildContext,
    name: Option<String>,
    width: u32,
    height: u32,
    viewport: Option<Viewport>,
    padding: Padding,
    data: Vec<Data>,
    scales: Vec<Scale>,
    marks: Vec<Mark>,
    axes: Vec<Axis>,
}

impl<'a> VisualizationBuilder<'a> {
    pub fn new(ctx: &'a BuildContext) -> Self {
        let config = ctx.config();
        Self {
            ctx,
            name: None,
            width: config.default_width,
            height: config.default_height,
            viewport: None,
            padding: Padding::uniform(config.default_padding),
            data: Vec::new(),
            scales: Vec::new(),
            marks: Vec::new(),
            axes: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(VegaBuilderError::invalid_input(
                "Visualization name must not be empty",
            ));
        }
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn viewport_value(self, viewport: &Value) -> Result<Self> {
        Ok(self.viewport(Viewport::from_value(viewport)?))
    }

    pub fn padding<P: Into<Padding>>(mut self, padding: P) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn padding_value(self, padding: &Value) -> Result<Self> {
        Ok(self.padding(Padding::from_value(padding)?))
    }

    pub fn data<I: IntoIterator<Item = Data>>(mut self, data: I) -> Self {
        self.data.extend(data);
        self
    }

    pub fn scales<I: IntoIterator<Item = Scale>>(mut self, scales: I) -> Self {
        self.scales.extend(scales);
        self
    }

    pub fn marks<I: IntoIterator<Item = Mark>>(mut self, marks: I) -> Self {
        self.marks.extend(marks);
        self
    }

    pub fn axes<I: IntoIterator<Item = Axis>>(mut self, axes: I) -> Self {
        self.axes.extend(axes);
        self
    }

    pub fn build(self) -> Result<Visualization> {
        let visualization = Visualization {
            name: self.name,
            width: self.width,
            height: self.height,
            viewport: self
                .viewport
                .unwrap_or_else(|| Viewport::new(self.width, self.height)),
            padding: self.padding,
            data: self.data,
            scales: self.scales,
            marks: self.marks,
            axes: self.axes,
        };
        if self.ctx.config().check_references {
            for reference in visualization.dangling_references()? {
                warn!("Visualization refers to {reference}, which it does not include");
            }
        }
        debug!(
            "Compiled visualization with {} data, {} scales, {} marks and {} axes",
            visualization.data.len(),
            visualization.scales.len(),
            visualization.marks.len(),
            visualization.axes.len()
        );
        Ok(visualization)
    }
}
