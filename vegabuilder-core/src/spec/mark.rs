/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Marks and their per-state visual properties.
use crate::attributes::{Attribute, Serializable};
use crate::context::BuildContext;
use crate::error::{Result, ResultWithContext, VegaBuilderError};
use crate::field::{resolve_field, ExtraFields};
use crate::spec::axis::Axis;
use crate::spec::scale::Scale;
use crate::spec::transform::TransformSpec;
use crate::spec::value_ref::{ValueRef, ValueRefSpec};
use crate::spec::values::DataReference;
use crate::spec::visitors::VisualizationVisitor;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use vegabuilder_common::naming::to_snake_case;

lazy_static! {
    static ref EASE_RE: Regex = Regex::new(
        r"^(linear|quad|cubic|sin|exp|circle|elastic|back|bounce)(-(in|out|in-out|out-in))?$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkType {
    Rect,
    Symbol,
    Path,
    Arc,
    Area,
    Line,
    Image,
    Text,
    Group,
}

impl MarkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkType::Rect => "rect",
            MarkType::Symbol => "symbol",
            MarkType::Path => "path",
            MarkType::Arc => "arc",
            MarkType::Area => "area",
            MarkType::Line => "line",
            MarkType::Image => "image",
            MarkType::Text => "text",
            MarkType::Group => "group",
        }
    }
}

impl Display for MarkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual property of a mark. Order of declaration is the order of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    X,
    X2,
    Width,
    Y,
    Y2,
    Height,
    Opacity,
    Fill,
    FillOpacity,
    Stroke,
    StrokeWidth,
    StrokeOpacity,
    StrokeDash,
    StrokeDashOffset,

    // symbol
    Size,
    Shape,

    // path
    Path,

    // arc
    InnerRadius,
    OuterRadius,
    StartAngle,
    EndAngle,

    // area, line
    Interpolate,
    Tension,

    // image, text
    Url,
    Align,
    Baseline,
    Text,
    Dx,
    Dy,
    Angle,
    Font,
    FontSize,
    FontWeight,
    FontStyle,
}

const ALL_CHANNELS: [Channel; 34] = [
    Channel::X,
    Channel::X2,
    Channel::Width,
    Channel::Y,
    Channel::Y2,
    Channel::Height,
    Channel::Opacity,
    Channel::Fill,
    Channel::FillOpacity,
    Channel::Stroke,
    Channel::StrokeWidth,
    Channel::StrokeOpacity,
    Channel::StrokeDash,
    Channel::StrokeDashOffset,
    Channel::Size,
    Channel::Shape,
    Channel::Path,
    Channel::InnerRadius,
    Channel::OuterRadius,
    Channel::StartAngle,
    Channel::EndAngle,
    Channel::Interpolate,
    Channel::Tension,
    Channel::Url,
    Channel::Align,
    Channel::Baseline,
    Channel::Text,
    Channel::Dx,
    Channel::Dy,
    Channel::Angle,
    Channel::Font,
    Channel::FontSize,
    Channel::FontWeight,
    Channel::FontStyle,
];

impl Channel {
    /// Builder name of the channel, camelCased on output
    pub fn name(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::X2 => "x2",
            Channel::Width => "width",
            Channel::Y => "y",
            Channel::Y2 => "y2",
            Channel::Height => "height",
            Channel::Opacity => "opacity",
            Channel::Fill => "fill",
            Channel::FillOpacity => "fill_opacity",
            Channel::Stroke => "stroke",
            Channel::StrokeWidth => "stroke_width",
            Channel::StrokeOpacity => "stroke_opacity",
            Channel::StrokeDash => "stroke_dash",
            Channel::StrokeDashOffset => "stroke_dash_offset",
            Channel::Size => "size",
            Channel::Shape => "shape",
            Channel::Path => "path",
            Channel::InnerRadius => "inner_radius",
            Channel::OuterRadius => "outer_radius",
            Channel::StartAngle => "start_angle",
            Channel::EndAngle => "end_angle",
            Channel::Interpolate => "interpolate",
            Channel::Tension => "tension",
            Channel::Url => "url",
            Channel::Align => "align",
            Channel::Baseline => "baseline",
            Channel::Text => "text",
            Channel::Dx => "dx",
            Channel::Dy => "dy",
            Channel::Angle => "angle",
            Channel::Font => "font",
            Channel::FontSize => "font_size",
            Channel::FontWeight => "font_weight",
            Channel::FontStyle => "font_style",
        }
    }

    fn is_shared(&self) -> bool {
        *self <= Channel::StrokeDashOffset
    }

    /// Whether the channel applies to the mark kind. Without a kind, as for
    /// axis styling, every channel is accepted.
    pub fn is_valid_for(&self, mark_type: Option<MarkType>) -> bool {
        let mark_type = match mark_type {
            Some(mark_type) => mark_type,
            None => return true,
        };
        if self.is_shared() {
            return true;
        }
        use Channel::*;
        match mark_type {
            MarkType::Symbol => matches!(self, Size | Shape),
            MarkType::Path => matches!(self, Path),
            MarkType::Arc => matches!(self, InnerRadius | OuterRadius | StartAngle | EndAngle),
            MarkType::Area | MarkType::Line => matches!(self, Interpolate | Tension),
            MarkType::Image => matches!(self, Url | Align | Baseline),
            MarkType::Text => matches!(
                self,
                Text | Align
                    | Baseline
                    | Dx
                    | Dy
                    | Angle
                    | Font
                    | FontSize
                    | FontWeight
                    | FontStyle
            ),
            MarkType::Rect | MarkType::Group => false,
        }
    }
}

impl FromStr for Channel {
    type Err = VegaBuilderError;

    /// Accepts the snake_case or camelCase name
    fn from_str(s: &str) -> Result<Self> {
        let name = to_snake_case(s);
        ALL_CHANNELS
            .iter()
            .find(|channel| channel.name() == name)
            .copied()
            .ok_or_else(|| VegaBuilderError::invalid_input(format!("Unknown visual property: {s}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkProperty {
    pub mark_type: Option<MarkType>,
    pub channels: BTreeMap<Channel, ValueRef>,
}

impl MarkProperty {
    pub fn get(&self, channel: Channel) -> Option<&ValueRef> {
        self.channels.get(&channel)
    }

    pub fn value_refs(&self) -> impl Iterator<Item = &ValueRef> {
        self.channels.values()
    }
}

impl Serializable for MarkProperty {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        self.channels
            .iter()
            .map(|(channel, value_ref)| {
                (
                    channel.name().to_string(),
                    Attribute::Node(value_ref as &dyn Serializable),
                )
            })
            .collect()
    }
}

/// Sets the visual properties of one mark state, resolving fields against
/// the data bound to the mark
pub struct MarkPropertyBuilder<'a> {
    ctx: &'a BuildContext,
    extra: ExtraFields,
    property: MarkProperty,
}

impl<'a> MarkPropertyBuilder<'a> {
    pub(crate) fn new(
        ctx: &'a BuildContext,
        mark_type: Option<MarkType>,
        extra: ExtraFields,
    ) -> Self {
        Self {
            ctx,
            extra,
            property: MarkProperty {
                mark_type,
                channels: Default::default(),
            },
        }
    }

    pub fn set<V: Into<ValueRefSpec>>(&mut self, channel: Channel, value: V) -> Result<&mut Self> {
        if !channel.is_valid_for(self.property.mark_type) {
            return Err(VegaBuilderError::invalid_input(format!(
                "Visual property {} is not valid for {} marks",
                channel.name(),
                self.property
                    .mark_type
                    .map(|t| t.as_str())
                    .unwrap_or("these")
            )));
        }
        let value_ref = value
            .into()
            .resolve(&self.ctx.registry(), &self.extra)
            .with_context(|| format!("Invalid value for visual property {}", channel.name()))?;
        self.property.channels.insert(channel, value_ref);
        Ok(self)
    }

    /// Set a property by name, as in `"stroke_width"` or `"strokeWidth"`
    pub fn set_named<V: Into<ValueRefSpec>>(&mut self, name: &str, value: V) -> Result<&mut Self> {
        let channel = Channel::from_str(name)?;
        self.set(channel, value)
    }

    pub(crate) fn finish(self) -> MarkProperty {
        self.property
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkFrom {
    pub data: Option<String>,
    pub transform: Vec<TransformSpec>,
}

impl Serializable for MarkFrom {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("data".to_string(), Attribute::value(self.data.clone())),
            ("transform".to_string(), Attribute::nodes(&self.transform)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkProperties {
    pub enter: Option<MarkProperty>,
    pub update: Option<MarkProperty>,
    pub exit: Option<MarkProperty>,
    pub hover: Option<MarkProperty>,
}

impl MarkProperties {
    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.update.is_none() && self.exit.is_none() && self.hover.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkProperty> {
        [&self.enter, &self.update, &self.exit, &self.hover]
            .into_iter()
            .flatten()
    }
}

impl Serializable for MarkProperties {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        vec![
            ("enter".to_string(), Attribute::node(self.enter.as_ref())),
            ("update".to_string(), Attribute::node(self.update.as_ref())),
            ("exit".to_string(), Attribute::node(self.exit.as_ref())),
            ("hover".to_string(), Attribute::node(self.hover.as_ref())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub type_: MarkType,
    pub name: Option<String>,
    pub description: Option<String>,
    pub from: Option<MarkFrom>,
    pub properties: MarkProperties,
    pub key: Option<String>,
    pub delay: Option<ValueRef>,
    pub ease: Option<String>,

    // group marks only
    pub scales: Vec<Scale>,
    pub axes: Vec<Axis>,
    pub marks: Vec<Mark>,

    extra_fields: ExtraFields,
}

impl Mark {
    pub fn new(type_: MarkType) -> Self {
        Self {
            type_,
            name: None,
            description: None,
            from: None,
            properties: Default::default(),
            key: None,
            delay: None,
            ease: None,
            scales: Vec::new(),
            axes: Vec::new(),
            marks: Vec::new(),
            extra_fields: ExtraFields::structural(),
        }
    }

    /// Fields available to the properties of this mark
    pub fn extra_fields(&self) -> &ExtraFields {
        &self.extra_fields
    }

    pub fn is_group(&self) -> bool {
        self.type_ == MarkType::Group
    }

    /// Visit the scales, axes and marks nested in this group
    pub fn walk(&self, visitor: &mut dyn VisualizationVisitor, scope: &[u32]) -> Result<()> {
        let scope = Vec::from(scope);
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
}

impl Serializable for Mark {
    fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
        let properties = if self.properties.is_empty() {
            Attribute::Undefined
        } else {
            Attribute::Node(&self.properties)
        };
        vec![
            (
                "type".to_string(),
                Attribute::Value(Value::String(self.type_.as_str().to_string())),
            ),
            ("name".to_string(), Attribute::value(self.name.clone())),
            ("description".to_string(), Attribute::value(self.description.clone())),
            ("from".to_string(), Attribute::node(self.from.as_ref())),
            ("properties".to_string(), properties),
            ("key".to_string(), Attribute::value(self.key.clone())),
            ("delay".to_string(), Attribute::node(self.delay.as_ref())),
            ("ease".to_string(), Attribute::value(self.ease.clone())),
            ("scales".to_string(), Attribute::nodes(&self.scales)),
            ("axes".to_string(), Attribute::nodes(&self.axes)),
            ("marks".to_string(), Attribute::nodes(&self.marks)),
        ]
    }
}

pub struct MarkBuilder<'a> {
    ctx: &'a BuildContext,
    mark: Mark,
}

impl<'a> MarkBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, type_: MarkType) -> Self {
        Self {
            ctx,
            mark: Mark::new(type_),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.mark.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.mark.description = Some(description.to_string());
        self
    }

    /// Bind the mark to a registered Data. Its fields become the context of
    /// every property of the mark.
    pub fn from_data<R: Into<DataReference>>(mut self, data: R) -> Result<Self> {
        self.expect_no_transforms("data")?;
        let data = data.into();
        let extra = self
            .ctx
            .registry()
            .expect_data(data.name())
            .with_context(|| "Invalid mark data")?
            .extra_fields()
            .clone();
        self.mark.extra_fields = extra;
        self.mark.from.get_or_insert_with(Default::default).data = Some(data.0);
        Ok(self)
    }

    /// Inherit the data context of an enclosing group mark, for marks drawn
    /// once per group
    pub fn within(mut self, group: &Mark) -> Result<Self> {
        self.expect_no_transforms("enclosing group")?;
        if !group.is_group() {
            return Err(VegaBuilderError::invalid_input(format!(
                "Marks can only be nested within group marks, not {} marks",
                group.type_
            )));
        }
        self.mark.extra_fields = group.extra_fields().clone();
        Ok(self)
    }

    /// Add a transform applied to the mark's data. It resolves against the
    /// fields of the data and the transforms added before it.
    pub fn from_transform(mut self, mut transform: TransformSpec) -> Result<Self> {
        let downstream = transform.attach(&self.mark.extra_fields, &self.ctx.registry())?;
        self.mark.extra_fields = downstream;
        self.mark
            .from
            .get_or_insert_with(Default::default)
            .transform
            .push(transform);
        Ok(self)
    }

    /// The field context must be fixed before transforms resolve against it
    fn expect_no_transforms(&self, what: &str) -> Result<()> {
        let attached = self
            .mark
            .from
            .as_ref()
            .map(|from| !from.transform.is_empty())
            .unwrap_or(false);
        if attached {
            return Err(VegaBuilderError::invalid_input(format!(
                "The {what} of a mark must be set before its transforms"
            )));
        }
        Ok(())
    }

    fn properties<F>(&self, f: F) -> Result<MarkProperty>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        let mut builder = MarkPropertyBuilder::new(
            self.ctx,
            Some(self.mark.type_),
            self.mark.extra_fields.clone(),
        );
        f(&mut builder)?;
        Ok(builder.finish())
    }

    pub fn enter<F>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        self.mark.properties.enter = Some(self.properties(f)?);
        Ok(self)
    }

    pub fn update<F>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        self.mark.properties.update = Some(self.properties(f)?);
        Ok(self)
    }

    pub fn exit<F>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        self.mark.properties.exit = Some(self.properties(f)?);
        Ok(self)
    }

    pub fn hover<F>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut MarkPropertyBuilder<'a>) -> Result<()>,
    {
        self.mark.properties.hover = Some(self.properties(f)?);
        Ok(self)
    }

    /// Field identifying records across updates
    pub fn key(mut self, field: &str) -> Self {
        self.mark.key = Some(resolve_field(field, &self.mark.extra_fields));
        self
    }

    pub fn delay<V: Into<ValueRefSpec>>(mut self, delay: V) -> Result<Self> {
        let delay = delay
            .into()
            .resolve(&self.ctx.registry(), &self.mark.extra_fields)?;
        self.mark.delay = Some(delay);
        Ok(self)
    }

    /// Easing function such as `cubic-in-out`
    pub fn ease(mut self, ease: &str) -> Result<Self> {
        if !EASE_RE.is_match(ease) {
            return Err(VegaBuilderError::invalid_input(format!(
                "Unknown easing function: {ease}"
            )));
        }
        self.mark.ease = Some(ease.to_string());
        Ok(self)
    }

    fn require_group(&self, property: &str) -> Result<()> {
        if self.mark.is_group() {
            Ok(())
        } else {
            Err(VegaBuilderError::invalid_input(format!(
                "Property {property} is only valid for group marks, not {} marks",
                self.mark.type_
            )))
        }
    }

    pub fn scales<I: IntoIterator<Item = Scale>>(mut self, scales: I) -> Result<Self> {
        self.require_group("scales")?;
        self.mark.scales.extend(scales);
        Ok(self)
    }

    pub fn axes<I: IntoIterator<Item = Axis>>(mut self, axes: I) -> Result<Self> {
        self.require_group("axes")?;
        self.mark.axes.extend(axes);
        Ok(self)
    }

    pub fn marks<I: IntoIterator<Item = Mark>>(mut self, marks: I) -> Result<Self> {
        self.require_group("marks")?;
        self.mark.marks.extend(marks);
        Ok(self)
    }

    pub fn build(self) -> Result<Mark> {
        if let Some(name) = &self.mark.name {
            if name.trim().is_empty() {
                return Err(VegaBuilderError::invalid_input("Mark name must not be empty"));
            }
        }
        self.ctx.registry_mut().register_mark(self.mark.clone())?;
        Ok(self.mark)
    }
}
