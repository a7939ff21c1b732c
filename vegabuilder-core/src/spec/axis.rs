/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::attributes::{multi_value, Attribute, Flag, Serializable};
use crate::context::BuildContext;
use crate::error::{Result, ResultWithContext, VegaBuilderError};
use crate::field::ExtraFields;
use crate::spec::mark::{MarkProperty, MarkPropertyBuilder};
use crate::spec::values::ScaleReference;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    X,
    Y,
}

impl AxisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisType::X => "x",
            AxisType::Y => "y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrient {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisOrient::Top => "top",
            AxisOrient::Bottom => "bottom",
            AxisOrient::Left => "left",
            AxisOrient::Right => "right",
        }
    }

    fn fits(&self, type_: AxisType) -> bool {
        match type_ {
            AxisType::X => matches!(self, AxisOrient::Top | AxisOrient::Bottom),
            AxisType::Y => matches!(self, AxisOrient::Left | AxisOrient::Right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisLayer {
    Front,
    Back,
}

impl AxisLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisLayer::Front => "front",
            AxisLayer::Back => "back",
        }
    }
}

/// Styleable element of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisPart {
    Ticks,
    MajorTicks,
    MinorTicks,
    Labels,
    Title,
    Axis,
}

impl AxisPart {
    pub fn name(&self) -> &'static str {
        match self {
            AxisPart::Ticks => "ticks",
            AxisPart::MajorTicks => "major_ticks",
            AxisPart::MinorTicks => "minor_ticks",
            AxisPart::Labels => "labels",
            AxisPart::Title => "title",
            AxisPart::Axis => "axis",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub type_: AxisType,
    pub scale: String,
    pub orient: Option<AxisOrient>,
    pub format: Option<String>,
    pub ticks: Option<u32>,
    pub values: Option<Vec<Value>>,
    pub subdivide: Option<u32>,
    pub tick_padding: Option<f64>,
    pub tick_size: Option<f64>,
    pub tick_size_major: Option<f64>,
    pub tick_size_minor: Option<f64>,
    pub tick_size_end: Option<f64>,
    pub offset: Option<f64>,
    pub properties: IndexMap<AxisPart, MarkProperty>,
    pub title: Option<String>,
    pub title_offset: Option<f64>,
    pub grid: Flag,
    pub layer: Option<AxisLayer>,
}

impl Axis {
    fn new(type_: AxisType) -> Self {
        Self {
            type_,
            scale: String::new(),
            orient: None,
            format: None,
            ticks: None,
            values: None,
            subdivide: None,
            tick_padding: None,
            tick_size: None,
            tick_size_major: None,
            tick_size_minor: None,
            tick_size_end: None,
            offset: None,
            properties: IndexMap::new(),
            title: None,
            title_offset: None,
            grid: Default::default(),
            layer: None,
        }
    }
}

impl Serializable for Axis {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        let properties = if self.properties.is_empty() {
            Attribute::Undefined
        } else {
            Attribute::Map(
                self.properties
                    .iter()
                    .map(|(part, property)| {
                        (part.name().to_string(), Attribute::Node(property as &dyn Serializable))
                    })
                    .collect(),
            )
        };
        vec![
            (
                "type".to_string(),
                Attribute::Value(Value::String(self.type_.as_str().to_string())),
            ),
            ("scale".to_string(), Attribute::Value(Value::String(self.scale.clone()))),
            ("orient".to_string(), Attribute::value(self.orient.map(|o| o.as_str()))),
            ("format".to_string(), Attribute::value(self.format.clone())),
            ("ticks".to_string(), Attribute::value(self.ticks)),
            ("values".to_string(), Attribute::value(self.values.clone())),
            ("subdivide".to_string(), Attribute::value(self.subdivide)),
            ("tick_padding".to_string(), Attribute::value(self.tick_padding)),
            ("tick_size".to_string(), Attribute::value(self.tick_size)),
            ("tick_size_major".to_string(), Attribute::value(self.tick_size_major)),
            ("tick_size_minor".to_string(), Attribute::value(self.tick_size_minor)),
            ("tick_size_end".to_string(), Attribute::value(self.tick_size_end)),
            ("offset".to_string(), Attribute::value(self.offset)),
            ("properties".to_string(), properties),
            ("title".to_string(), Attribute::value(self.title.clone())),
            ("title_offset".to_string(), Attribute::value(self.title_offset)),
            ("grid".to_string(), self.grid.attribute()),
            ("layer".to_string(), Attribute::value(self.layer.map(|l| l.as_str()))),
        ]
    }
}

pub struct AxisBuilder<'a> {
    ctx: &'a BuildContext,
    axis: Axis,
    has_scale: bool,
}

impl<'a> AxisBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, type_: AxisType) -> Self {
        Self {
            ctx,
            axis: Axis::new(type_),
            has_scale: false,
        }
    }

    pub fn scale<S: Into<ScaleReference>>(mut self, scale: S) -> Result<Self> {
        let scale = match scale.into() {
            ScaleReference::Name(name) => self
                .ctx
                .registry()
                .expect_scale(&name)
                .with_context(|| format!("Invalid scale for {} axis", self.axis.type_.as_str()))?
                .name
                .clone(),
            ScaleReference::Object(name) => name,
        };
        self.axis.scale = scale;
        self.has_scale = true;
        Ok(self)
    }

    pub fn orient(mut self, orient: AxisOrient) -> Result<Self> {
        if !orient.fits(self.axis.type_) {
            return Err(VegaBuilderError::invalid_input(format!(
                "A {} axis cannot be oriented {}",
                self.axis.type_.as_str(),
                orient.as_str()
            )));
        }
        self.axis.orient = Some(orient);
        Ok(self)
    }

    pub fn format(mut self, format: &str) -> Self {
        self.axis.format = Some(format.to_string());
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.axis.ticks = Some(ticks);
        self
    }

    /// Explicit tick values, given as one list or several values
    pub fn values<I: IntoIterator<Item = Value>>(mut self, values: I) -> Result<Self> {
        let values = multi_value("values", values, |name, values| {
            if values.is_empty() {
                Err(VegaBuilderError::invalid_input(format!(
                    "Attribute {name} expects at least one value"
                )))
            } else {
                Ok(values)
            }
        })?;
        self.axis.values = Some(values);
        Ok(self)
    }

    pub fn subdivide(mut self, subdivide: u32) -> Self {
        self.axis.subdivide = Some(subdivide);
        self
    }

    pub fn tick_padding(mut self, padding: f64) -> Self {
        self.axis.tick_padding = Some(padding);
        self
    }

    pub fn tick_size(mut self, size: f64) -> Self {
        self.axis.tick_size = Some(size);
        self
    }

    pub fn tick_size_major(mut self, size: f64) -> Self {
        self.axis.tick_size_major = Some(size);
        self
    }

    pub fn tick_size_minor(mut self, size: f64) -> Self {
        self.axis.tick_size_minor = Some(size);
        self
    }

    pub fn tick_size_end(mut self, size: f64) -> Self {
        self.axis.tick_size_end = Some(size);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.axis.offset = Some(offset);
        self
    }

    /// Custom styling of one part of the axis
    pub fn properties<F>(mut self, part: AxisPart, f: F) -> Result<Self>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        let mut builder = MarkPropertyBuilder::new(self.ctx, None, ExtraFields::structural());
        f(&mut builder)?;
        self.axis.properties.insert(part, builder.finish());
        Ok(self)
    }

    pub fn title(mut self, title: &str) -> Self {
        self.axis.title = Some(title.to_string());
        self
    }

    pub fn title_with_offset(mut self, title: &str, offset: f64) -> Self {
        self.axis.title = Some(title.to_string());
        self.axis.title_offset = Some(offset);
        self
    }

    pub fn grid(mut self) -> Self {
        self.axis.grid.set();
        self
    }

    pub fn layer(mut self, layer: AxisLayer) -> Self {
        self.axis.layer = Some(layer);
        self
    }

    pub fn build(self) -> Result<Axis> {
        if !self.has_scale {
            return Err(VegaBuilderError::invalid_input(format!(
                "A {} axis requires a scale",
                self.axis.type_.as_str()
            )));
        }
        self.ctx.registry_mut().register_axis(self.axis.clone());
        Ok(self.axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::collect_attributes;
    use crate::spec::mark::Channel;
    use crate::spec::scale::ScaleType;
    use serde_json::json;

    #[test]
    fn test_axis_requires_registered_scale() {
        let ctx = BuildContext::new();
        let err = ctx.x_axis().scale("x").err().unwrap();
        assert!(err.is_invalid_input());
        assert!(ctx.x_axis().build().is_err());
    }

    #[test]
    fn test_axis_serialization() {
        let ctx = BuildContext::new();
        let y = ctx.scale("y", ScaleType::Linear).build().unwrap();
        let axis = ctx
            .y_axis()
            .scale(&y)
            .unwrap()
            .orient(AxisOrient::Right)
            .unwrap()
            .ticks(5)
            .values(vec![json!([0, 50]), json!(100)])
            .unwrap()
            .title_with_offset("Count", 40.0)
            .grid()
            .layer(AxisLayer::Back)
            .properties(AxisPart::MajorTicks, |props| {
                props.set(Channel::StrokeWidth, 2)?;
                Ok(())
            })
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            collect_attributes(&axis),
            json!({
                "type": "y",
                "scale": "y",
                "orient": "right",
                "ticks": 5,
                "values": [0, 50, 100],
                "properties": {"majorTicks": {"strokeWidth": {"value": 2}}},
                "title": "Count",
                "titleOffset": 40.0,
                "grid": true,
                "layer": "back"
            })
        );
        assert_eq!(ctx.registry().axes().len(), 1);
    }

    #[test]
    fn test_restyled_part_keeps_its_position() {
        let ctx = BuildContext::new();
        ctx.scale("x", ScaleType::Linear).build().unwrap();
        let axis = ctx
            .x_axis()
            .scale("x")
            .unwrap()
            .properties(AxisPart::MajorTicks, |props| {
                props.set(Channel::StrokeWidth, 1)?;
                Ok(())
            })
            .unwrap()
            .properties(AxisPart::Labels, |props| {
                props.set(Channel::Fill, "gray")?;
                Ok(())
            })
            .unwrap()
            .properties(AxisPart::MajorTicks, |props| {
                props.set(Channel::StrokeWidth, 3)?;
                Ok(())
            })
            .unwrap()
            .build()
            .unwrap();
        let parts: Vec<_> = axis.properties.keys().copied().collect();
        assert_eq!(parts, vec![AxisPart::MajorTicks, AxisPart::Labels]);
        assert_eq!(
            collect_attributes(&axis)["properties"]["majorTicks"],
            json!({"strokeWidth": {"value": 3}})
        );
    }

    #[test]
    fn test_orient_fits_axis_type() {
        let ctx = BuildContext::new();
        assert!(ctx.x_axis().orient(AxisOrient::Left).is_err());
        assert!(ctx.x_axis().orient(AxisOrient::Top).is_ok());
        assert!(ctx.y_axis().orient(AxisOrient::Bottom).is_err());
    }
}
