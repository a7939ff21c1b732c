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
use vegabuilder_core::spec::visualization::SpecFormat;
use vegabuilder_core::BuildContext;

/// Area chart with padding given as a JSON object
fn main() -> Result<()> {
    initialize_logging();
    let ctx = BuildContext::new();

    let table = ctx
        .data("table")
        .values_str(
            r#"[
                {"x": 1, "y": 28}, {"x": 2, "y": 55}, {"x": 3, "y": 43}, {"x": 4, "y": 91},
                {"x": 5, "y": 81}, {"x": 6, "y": 53}, {"x": 7, "y": 19}, {"x": 8, "y": 87},
                {"x": 9, "y": 52}, {"x": 10, "y": 48}, {"x": 11, "y": 24}, {"x": 12, "y": 49}
            ]"#,
        )?
        .build()?;

    let x = ctx
        .scale("x", ScaleType::Linear)
        .domain("table.x")?
        .range_literal(RangeLiteral::Width)
        .zero(false)?
        .build()?;
    let y = ctx
        .scale("y", ScaleType::Linear)
        .domain("table.y")?
        .range_literal(RangeLiteral::Height)
        .nice(Nice::Enabled(true))?
        .build()?;

    let x_axis = ctx.x_axis().scale(&x)?.ticks(20).build()?;
    let y_axis = ctx.y_axis().scale(&y)?.build()?;

    let area = ctx
        .mark(MarkType::Area)
        .from_data(&table)?
        .enter(|props| {
            props
                .set(Channel::Interpolate, "monotone")?
                .set(Channel::X, ValueRefSpec::new().scale(&x).field("x"))?
                .set(Channel::Y, ValueRefSpec::new().scale(&y).field("y"))?
                .set(Channel::Y2, ValueRefSpec::new().scale(&y).value(0))?
                .set(Channel::Fill, "steelblue")?;
            Ok(())
        })?
        .update(|props| {
            props.set(Channel::FillOpacity, 1)?;
            Ok(())
        })?
        .hover(|props| {
            props.set(Channel::FillOpacity, 0.5)?;
            Ok(())
        })?
        .build()?;

    let vis = ctx
        .visualization()
        .name("area")?
        .width(500)
        .height(200)
        .padding_value(&json!({"top": 10, "left": 30, "bottom": 30, "right": 10}))?
        .data([table])
        .scales([x, y])
        .axes([x_axis, y_axis])
        .marks([area])
        .build()?;

    println!("{}", vis.generate_spec(SpecFormat::Pretty)?);
    Ok(())
}
