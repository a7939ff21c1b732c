/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use rust_examples::initialize_logging;
use serde_json::json;
use vegabuilder_common::error::Result;
use vegabuilder_core::spec::data::DataFormat;
use vegabuilder_core::spec::mark::{Channel, MarkType};
use vegabuilder_core::spec::scale::{Nice, RangeLiteral, ScaleType, TimeInterval};
use vegabuilder_core::spec::value_ref::ValueRefSpec;
use vegabuilder_core::spec::visualization::SpecFormat;
use vegabuilder_core::BuildContext;

/// Timeline of early presidents with events drawn above
fn main() -> Result<()> {
    initialize_logging();
    let ctx = BuildContext::new();

    let people = ctx
        .data("people")
        .values(json!([
            {"label": "Washington", "born": -7506057600000i64, "died": -5366196000000i64,
             "enter": -5701424400000i64, "leave": -5453884800000i64},
            {"label": "Adams", "born": -7389766800000i64, "died": -4528285200000i64,
             "enter": -5453884800000i64, "leave": -5327740800000i64},
            {"label": "Jefferson", "born": -7154586000000i64, "died": -4528285200000i64,
             "enter": -5327740800000i64, "leave": -5075280000000i64},
            {"label": "Madison", "born": -6904544400000i64, "died": -4213184400000i64,
             "enter": -5075280000000i64, "leave": -4822819200000i64},
            {"label": "Monroe", "born": -6679904400000i64, "died": -4370518800000i64,
             "enter": -4822819200000i64, "leave": -4570358400000i64}
        ]))?
        .build()?;

    let events = ctx
        .data("events")
        .format(DataFormat::json().date(["when"])?)
        .values(json!([
            {"name": "Decl. of Independence", "when": "July 4, 1776"},
            {"name": "U.S. Constitution", "when": "3/4/1789"},
            {"name": "Louisiana Purchase", "when": "April 30, 1803"},
            {"name": "Monroe Doctrine", "when": "Dec 2, 1823"}
        ]))?
        .build()?;

    let y = ctx
        .scale("y", ScaleType::Ordinal)
        .domain("people.label")?
        .range_literal(RangeLiteral::Height)
        .build()?;
    let x = ctx
        .scale("x", ScaleType::Time)
        .domain_fields(&["people.born", "people.died"])?
        .range_literal(RangeLiteral::Width)
        .round()
        .nice(Nice::Interval(TimeInterval::Year))?
        .build()?;

    let event_labels = ctx
        .mark(MarkType::Text)
        .from_data(&events)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("when"))?
                .set(Channel::Y, -10)?
                .set(Channel::Angle, -25)?
                .set(Channel::Fill, "#000")?
                .set(Channel::Text, ValueRefSpec::new().field("name"))?
                .set(Channel::Font, "Helvetica Neue")?
                .set(Channel::FontSize, 10)?;
            Ok(())
        })?
        .build()?;

    let event_rules = ctx
        .mark(MarkType::Rect)
        .from_data(&events)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("when"))?
                .set(Channel::Y, -8)?
                .set(Channel::Width, 1)?
                .set(Channel::Height, ValueRefSpec::new().group("height").offset(8))?
                .set(Channel::Fill, "#888")?;
            Ok(())
        })?
        .build()?;

    let people_labels = ctx
        .mark(MarkType::Text)
        .from_data(&people)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("born"))?
                .set(Channel::Y, ValueRefSpec::new().scale(&y).field("label").offset(-3))?
                .set(Channel::Fill, "#000")?
                .set(Channel::Text, ValueRefSpec::new().field("label"))?
                .set(Channel::Font, "Helvetica Neue")?
                .set(Channel::FontSize, 10)?;
            Ok(())
        })?
        .build()?;

    let lifespans = ctx
        .mark(MarkType::Rect)
        .from_data(&people)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("born"))?
                .set(Channel::X2, ValueRefSpec::new().scale(&x).field("died"))?
                .set(Channel::Y, ValueRefSpec::new().scale(&y).field("label"))?
                .set(Channel::Height, 2)?
                .set(Channel::Fill, "#557")?;
            Ok(())
        })?
        .build()?;

    let terms = ctx
        .mark(MarkType::Rect)
        .from_data(&people)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("enter"))?
                .set(Channel::X2, ValueRefSpec::new().scale(&x).field("leave"))?
                .set(Channel::Y, ValueRefSpec::new().scale(&y).field("label").offset(-1))?
                .set(Channel::Height, 4)?
                .set(Channel::Fill, "#e44")?;
            Ok(())
        })?
        .build()?;

    let x_axis = ctx.x_axis().scale("x")?.build()?;

    let vis = ctx
        .visualization()
        .name("lifelines")?
        .width(400)
        .height(100)
        .data([people, events])
        .scales([x, y])
        .axes([x_axis])
        .marks([event_labels, event_rules, people_labels, lifespans, terms])
        .build()?;

    println!("{}", vis.generate_spec(SpecFormat::Pretty)?);
    Ok(())
}
