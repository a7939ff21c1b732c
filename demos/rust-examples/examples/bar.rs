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
use vegabuilder_core::spec::mark::{Channel, MarkType};
use vegabuilder_core::spec::scale::{Nice, RangeLiteral, ScaleType};
use vegabuilder_core::spec::value_ref::ValueRefSpec;
use vegabuilder_core::spec::visualization::{Padding, SpecFormat};
use vegabuilder_core::BuildContext;

/// Bar chart of a small inline table
fn main() -> Result<()> {
    initialize_logging();
    let ctx = BuildContext::new();

    let table = ctx
        .data("table")
        .values(json!([
            {"x": 1, "y": 28}, {"x": 2, "y": 55}, {"x": 3, "y": 43}, {"x": 4, "y": 91},
            {"x": 5, "y": 81}, {"x": 6, "y": 53}, {"x": 7, "y": 19}, {"x": 8, "y": 87},
            {"x": 9, "y": 52}, {"x": 10, "y": 48}, {"x": 11, "y": 24}, {"x": 12, "y": 49},
            {"x": 13, "y": 87}, {"x": 14, "y": 66}, {"x": 15, "y": 17}, {"x": 16, "y": 27},
            {"x": 17, "y": 68}, {"x": 18, "y": 16}, {"x": 19, "y": 49}, {"x": 20, "y": 15}
        ]))?
        .build()?;

    let x = ctx
        .scale("x", ScaleType::Ordinal)
        .domain(&table)?
        .range_literal(RangeLiteral::Width)
        .build()?;
    let y = ctx
        .scale("y", ScaleType::Linear)
        .domain("table.y")?
        .range_literal(RangeLiteral::Height)
        .nice(Nice::Enabled(true))?
        .build()?;

    let x_axis = ctx.x_axis().scale(&x)?.build()?;
    let y_axis = ctx.y_axis().scale(&y)?.build()?;

    let bars = ctx
        .mark(MarkType::Rect)
        .from_data(&table)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("index"))?
                .set(Channel::Width, ValueRefSpec::new().scale(&x).band().offset(-1))?
                .set(Channel::Y, ValueRefSpec::new().scale(&y).field("y"))?
                .set(Channel::Y2, ValueRefSpec::new().scale(&y).value(0))?;
            Ok(())
        })?
        .update(|props| {
            props.set(Channel::Fill, "steelblue")?;
            Ok(())
        })?
        .hover(|props| {
            props.set(Channel::Fill, "red")?;
            Ok(())
        })?
        .build()?;

    let vis = ctx
        .visualization()
        .name("bar")?
        .width(400)
        .height(200)
        .padding(Padding {
            top: 10,
            left: 30,
            right: 10,
            bottom: 30,
        })
        .data([table])
        .scales([x, y])
        .axes([x_axis, y_axis])
        .marks([bars])
        .build()?;

    println!("{}", vis.generate_spec(SpecFormat::Pretty)?);
    Ok(())
}
