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
use vegabuilder_core::spec::scale::ScaleType;
use vegabuilder_core::spec::transform::TransformKind;
use vegabuilder_core::spec::value_ref::ValueRefSpec;
use vegabuilder_core::spec::visualization::SpecFormat;
use vegabuilder_core::BuildContext;

/// Donut chart built with the pie transform
fn main() -> Result<()> {
    initialize_logging();
    let ctx = BuildContext::new();

    let pie = ctx.transform(TransformKind::Pie, json!({}))?;
    let table = ctx
        .data("table")
        .values(json!([12, 23, 47, 6, 52, 19]))?
        .transform(pie)?
        .build()?;

    let r = ctx
        .scale("r", ScaleType::Sqrt)
        .domain(&table)?
        .range([20i64, 100])?
        .build()?;

    let arcs = ctx
        .mark(MarkType::Arc)
        .from_data(&table)?
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().group("width").mult(0.5))?
                .set(Channel::Y, ValueRefSpec::new().group("height").mult(0.5))?
                .set(Channel::StartAngle, ValueRefSpec::new().field("start_angle"))?
                .set(Channel::EndAngle, ValueRefSpec::new().field("end_angle"))?
                .set(Channel::InnerRadius, 20)?
                .set(Channel::OuterRadius, ValueRefSpec::new().scale(&r).field("data"))?
                .set(Channel::Stroke, "#fff")?;
            Ok(())
        })?
        .update(|props| {
            props.set(Channel::Fill, "#ccc")?;
            Ok(())
        })?
        .hover(|props| {
            props.set(Channel::Fill, "pink")?;
            Ok(())
        })?
        .build()?;

    let vis = ctx
        .visualization()
        .name("arc")?
        .width(400)
        .height(400)
        .data([table])
        .scales([r])
        .marks([arcs])
        .build()?;

    println!("{}", vis.generate_spec(SpecFormat::Pretty)?);
    Ok(())
}
