/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde_json::{json, Value};
use vegabuilder_core::config::BuilderConfig;
use vegabuilder_core::spec::data::DataFormat;
use vegabuilder_core::spec::mark::{Channel, MarkType};
use vegabuilder_core::spec::scale::{Nice, RangeLiteral, ScaleType, TimeInterval};
use vegabuilder_core::spec::transform::TransformKind;
use vegabuilder_core::spec::value_ref::ValueRefSpec;
use vegabuilder_core::spec::visualization::{Padding, SpecFormat, Viewport};
use vegabuilder_core::BuildContext;

fn bar_chart(ctx: &BuildContext) -> Value {
    let table = ctx
        .data("table")
        .values(json!([
            {"x": 1, "y": 28}, {"x": 2, "y": 55}, {"x": 3, "y": 43},
            {"x": 4, "y": 91}, {"x": 5, "y": 81}, {"x": 6, "y": 53}
        ]))
        .unwrap()
        .build()
        .unwrap();
    let x = ctx
        .scale("x", ScaleType::Ordinal)
        .domain("table.x")
        .unwrap()
        .range_literal(RangeLiteral::Width)
        .build()
        .unwrap();
    let y = ctx
        .scale("y", ScaleType::Linear)
        .domain("table.y")
        .unwrap()
        .range_literal(RangeLiteral::Height)
        .nice(Nice::Enabled(true))
        .unwrap()
        .build()
        .unwrap();
    let x_axis = ctx.x_axis().scale(&x).unwrap().build().unwrap();
    let y_axis = ctx.y_axis().scale(&y).unwrap().build().unwrap();
    let bars = ctx
        .mark(MarkType::Rect)
        .from_data(&table)
        .unwrap()
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale("x").field("x"))?
                .set(Channel::Width, ValueRefSpec::new().scale("x").band().offset(-1))?
                .set(Channel::Y, ValueRefSpec::new().scale("y").field("y"))?
                .set(Channel::Y2, ValueRefSpec::new().scale("y").value(0))?;
            Ok(())
        })
        .unwrap()
        .update(|props| {
            props.set(Channel::Fill, "steelblue")?;
            Ok(())
        })
        .unwrap()
        .hover(|props| {
            props.set(Channel::Fill, "red")?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    ctx.visualization()
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
        .build()
        .unwrap()
        .to_spec()
}

#[test]
fn test_bar_chart() {
    let ctx = BuildContext::new();
    let spec = bar_chart(&ctx);

    assert_eq!(spec["width"], json!(400));
    assert_eq!(spec["viewport"], json!([400, 200]));
    assert_eq!(
        spec["padding"],
        json!({"top": 10, "left": 30, "right": 10, "bottom": 30})
    );
    assert_eq!(spec["data"][0]["name"], json!("table"));
    assert_eq!(spec["data"][0]["values"][3], json!({"x": 4, "y": 91}));
    assert_eq!(
        spec["scales"],
        json!([
            {"name": "x", "type": "ordinal", "domain": {"data": "table", "field": "data.x"}, "range": "width"},
            {"name": "y", "type": "linear", "domain": {"data": "table", "field": "data.y"}, "range": "height", "nice": true}
        ])
    );
    assert_eq!(
        spec["axes"],
        json!([{"type": "x", "scale": "x"}, {"type": "y", "scale": "y"}])
    );

    let mark = &spec["marks"][0];
    assert_eq!(mark["type"], json!("rect"));
    assert_eq!(mark["from"], json!({"data": "table"}));
    assert_eq!(
        mark["properties"]["enter"]["x"],
        json!({"field": "data.x", "scale": "x"})
    );
    assert_eq!(
        mark["properties"]["enter"]["y2"],
        json!({"value": 0, "scale": "y"})
    );
    assert_eq!(mark["properties"]["update"]["fill"], json!({"value": "steelblue"}));
    assert_eq!(mark["properties"]["hover"]["fill"], json!({"value": "red"}));
}

#[test]
fn test_generate_spec_round_trips_through_json() {
    let ctx = BuildContext::new();
    let spec = bar_chart(&ctx);
    let vis = ctx.visualization().build().unwrap();
    let compact = vis.generate_spec(SpecFormat::Compact).unwrap();
    let parsed: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(parsed, vis.to_spec());

    // Top-level keys keep declaration order
    let keys: Vec<_> = spec.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        vec!["width", "height", "viewport", "padding", "data", "scales", "marks", "axes"]
    );
}

#[test]
fn test_contexts_are_isolated() {
    let first = BuildContext::new();
    let second = BuildContext::new();
    bar_chart(&first);
    bar_chart(&second);
    assert_eq!(first.registry().data().len(), 1);
    assert_eq!(second.registry().data().len(), 1);
}

#[test]
fn test_duplicate_data_name() {
    let ctx = BuildContext::new();
    ctx.data("table").values(json!([1, 2])).unwrap().build().unwrap();
    let err = ctx
        .data("table")
        .values(json!([3, 4]))
        .unwrap()
        .build()
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
    assert_eq!(err.message(), "Duplicate Data name: table");
    assert_eq!(ctx.registry().data().len(), 1);
    assert!(!ctx.registry().is_duplicate_name(
        vegabuilder_core::registry::EntityKind::Data,
        "table"
    ));
}

#[test]
fn test_duplicate_scale_name() {
    let ctx = BuildContext::new();
    ctx.scale("x", ScaleType::Linear).build().unwrap();
    let err = ctx
        .scale("x", ScaleType::Ordinal)
        .build()
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
    assert_eq!(err.message(), "Duplicate Scale name: x");
    assert_eq!(ctx.registry().scales().len(), 1);
    assert_eq!(ctx.registry().scales()[0].type_, ScaleType::Linear);
}

#[test]
fn test_dangling_references() {
    let ctx = BuildContext::new();
    let spec = bar_chart(&ctx);
    assert_eq!(spec["marks"].as_array().unwrap().len(), 1);

    let y = ctx.registry().find_scale("y").cloned().unwrap();
    let y_axis = ctx.y_axis().scale(&y).unwrap().build().unwrap();
    let bars = ctx.registry().marks()[0].clone();
    let vis = ctx
        .visualization()
        .axes([y_axis])
        .marks([bars])
        .build()
        .unwrap();
    assert_eq!(
        vis.dangling_references().unwrap(),
        vec!["Data table", "Scale y", "Scale x"]
    );
}

#[test]
fn test_axis_with_unregistered_scale() {
    let ctx = BuildContext::new();
    let err = ctx.x_axis().scale("x").err().unwrap();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("No Scale registered with name: x"));
}

#[test]
fn test_filter_requires_datum() {
    let ctx = BuildContext::new();
    assert!(ctx
        .transform(TransformKind::Filter, json!({"test": "d.data.y > 10"}))
        .is_ok());
    let err = ctx
        .transform(TransformKind::Filter, json!({"test": "datum.y > 10"}))
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
    assert_eq!(ctx.registry().transforms().len(), 1);
}

#[test]
fn test_unknown_transform_property() {
    let ctx = BuildContext::new();
    let err = ctx
        .transform(TransformKind::Pie, json!({"angle": "y"}))
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
}

#[test]
fn test_copy_requires_matching_outputs() {
    let ctx = BuildContext::new();
    assert!(ctx
        .transform(
            TransformKind::Copy,
            json!({"from": "mouse", "fields": ["x", "y"], "as": ["mx"]})
        )
        .is_err());
    let copy = ctx
        .transform(
            TransformKind::Copy,
            json!({"from": "mouse", "fields": ["x", "y"], "as": ["mouse_x", "mouse_y"]}),
        )
        .unwrap();
    let data = ctx
        .data("points")
        .values(json!([{"x": 1}]))
        .unwrap()
        .transform(copy)
        .unwrap()
        .build()
        .unwrap();
    let s = ctx
        .scale("mx", ScaleType::Linear)
        .domain("points.mouse_x")
        .unwrap()
        .build()
        .unwrap();
    assert!(data.extra_fields().contains("mouse_y"));
    assert_eq!(
        vegabuilder_core::attributes::collect_attributes(&s)["domain"]["field"],
        json!("mouse_x")
    );
}

#[test]
fn test_stats_fields_resolve_bare() {
    let ctx = BuildContext::new();
    ctx.data("table")
        .values(json!([{"y": 1}, {"y": 5}]))
        .unwrap()
        .build()
        .unwrap();
    let stats = ctx
        .transform(TransformKind::Stats, json!({"value": "y"}))
        .unwrap();
    ctx.data("summary")
        .source("table")
        .unwrap()
        .transform(stats)
        .unwrap()
        .build()
        .unwrap();
    let vis = ctx
        .visualization()
        .scales([ctx
            .scale("s", ScaleType::Linear)
            .domain_bounded("summary.y", "summary.min", "summary.max")
            .unwrap()
            .build()
            .unwrap()])
        .build()
        .unwrap();
    let spec = vis.to_spec();
    assert_eq!(spec["scales"][0]["domain"]["field"], json!("data.y"));
    assert_eq!(spec["scales"][0]["domainMin"]["field"], json!("min"));
    assert_eq!(spec["scales"][0]["domainMax"]["field"], json!("max"));
    assert_eq!(
        vis.dangling_references().unwrap(),
        vec!["Data summary"]
    );
}

#[test]
fn test_user_fields_differing_in_case_from_stats_outputs() {
    let ctx = BuildContext::new();
    let stats = ctx
        .transform(TransformKind::Stats, json!({"value": "Count"}))
        .unwrap();
    ctx.data("table")
        .values(json!([{"Count": 1}, {"Count": 4}]))
        .unwrap()
        .transform(stats)
        .unwrap()
        .build()
        .unwrap();
    let s = ctx
        .scale("s", ScaleType::Linear)
        .domain("table.Count")
        .unwrap()
        .build()
        .unwrap();
    let dot = ctx
        .mark(MarkType::Symbol)
        .from_data("table")
        .unwrap()
        .enter(|props| {
            props
                .set(Channel::Y, ValueRefSpec::new().scale("s").field("Count"))?
                .set(Channel::Size, ValueRefSpec::new().field("count"))?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();
    let spec = ctx
        .visualization()
        .scales([s])
        .marks([dot])
        .build()
        .unwrap()
        .to_spec();
    assert_eq!(spec["scales"][0]["domain"]["field"], json!("data.Count"));
    assert_eq!(
        spec["marks"][0]["properties"]["enter"]["y"]["field"],
        json!("data.Count")
    );
    assert_eq!(
        spec["marks"][0]["properties"]["enter"]["size"]["field"],
        json!("count")
    );
}

#[test]
fn test_data_named_data_resolves_its_extra_fields() {
    let ctx = BuildContext::new();
    let facet = ctx
        .transform(TransformKind::Facet, json!({"keys": ["category"]}))
        .unwrap();
    ctx.data("data")
        .values(json!([{"category": "A", "value": 1}]))
        .unwrap()
        .transform(facet)
        .unwrap()
        .build()
        .unwrap();
    let keys = ctx
        .scale("keys", ScaleType::Ordinal)
        .domain("data.key")
        .unwrap()
        .build()
        .unwrap();
    let values = ctx
        .scale("values", ScaleType::Linear)
        .domain("data.value")
        .unwrap()
        .build()
        .unwrap();
    let spec = ctx
        .visualization()
        .scales([keys, values])
        .build()
        .unwrap()
        .to_spec();
    assert_eq!(
        spec["scales"][0]["domain"],
        json!({"data": "data", "field": "key"})
    );
    assert_eq!(spec["scales"][1]["domain"]["field"], json!("data.value"));
}

#[test]
fn test_nice_depends_on_scale_type() {
    let ctx = BuildContext::new();
    assert!(ctx.scale("a", ScaleType::Linear).nice(Nice::Enabled(true)).is_ok());
    assert!(ctx
        .scale("b", ScaleType::Time)
        .nice(Nice::Interval(TimeInterval::Month))
        .is_ok());
    assert!(ctx.scale("c", ScaleType::Linear).nice(Nice::Interval(TimeInterval::Month)).is_err());
    assert!(ctx.scale("d", ScaleType::Ordinal).nice(Nice::Enabled(true)).is_err());
    assert!(ctx.scale("e", ScaleType::Ordinal).points().is_ok());
    assert!(ctx.scale("f", ScaleType::Linear).points().is_err());
}

#[test]
fn test_data_urls_and_formats() {
    let ctx = BuildContext::new();
    let remote = ctx
        .data("remote")
        .url("https://example.com/data/cars.json")
        .unwrap()
        .format(DataFormat::json().property("values.features").unwrap())
        .build()
        .unwrap();
    let local = ctx
        .data("local")
        .url("data/stocks.csv")
        .unwrap()
        .format(DataFormat::csv().number(["price"]).unwrap())
        .build()
        .unwrap();
    let vis = ctx.visualization().data([remote, local]).build().unwrap();
    let spec = vis.to_spec();
    assert_eq!(spec["data"][0]["url"], json!("https://example.com/data/cars.json"));
    assert_eq!(
        spec["data"][0]["format"],
        json!({"type": "json", "property": "values.features"})
    );
    assert_eq!(spec["data"][1]["url"], json!("data/stocks.csv"));
    assert_eq!(
        spec["data"][1]["format"],
        json!({"type": "csv", "parse": {"price": "number"}})
    );
    assert!(DataFormat::csv().property("values").is_err());
    assert!(ctx.data("bad").url("http://exa mple.com").is_err());
}

#[test]
fn test_group_marks_nest_scales_and_marks() {
    let ctx = BuildContext::new();
    ctx.data("table")
        .values(json!([{"category": "A", "value": 1}]))
        .unwrap()
        .build()
        .unwrap();
    let facet = ctx
        .transform(TransformKind::Facet, json!({"keys": ["category"]}))
        .unwrap();
    let group = ctx
        .mark(MarkType::Group)
        .from_data("table")
        .unwrap()
        .from_transform(facet)
        .unwrap()
        .build()
        .unwrap();
    let inner = ctx
        .scale("inner", ScaleType::Ordinal)
        .domain("table.value")
        .unwrap()
        .range_literal(RangeLiteral::Colors)
        .build()
        .unwrap();
    let dot = ctx
        .mark(MarkType::Symbol)
        .within(&group)
        .unwrap()
        .enter(|props| {
            props.set(Channel::Fill, ValueRefSpec::new().scale("inner").field("key"))?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();
    let group = ctx
        .mark(MarkType::Group)
        .name("cell")
        .from_data("table")
        .unwrap()
        .scales([inner])
        .unwrap()
        .marks([dot])
        .unwrap()
        .build()
        .unwrap();
    let vis = ctx
        .visualization()
        .data(ctx.registry().data().to_vec())
        .marks([group])
        .viewport(Viewport::new(800, 600))
        .build()
        .unwrap();
    let spec = vis.to_spec();
    assert_eq!(spec["viewport"], json!([800, 600]));
    assert_eq!(spec["marks"][0]["scales"][0]["range"], json!("category10"));
    assert_eq!(
        spec["marks"][0]["marks"][0]["properties"]["enter"]["fill"],
        json!({"field": "key", "scale": "inner"})
    );
    assert!(vis.dangling_references().unwrap().is_empty());
}

#[test]
fn test_group_scales_are_not_visible_outside_the_group() {
    let ctx = BuildContext::new();
    let inner = ctx
        .scale("inner", ScaleType::Ordinal)
        .range_literal(RangeLiteral::Colors)
        .build()
        .unwrap();
    let dot = ctx
        .mark(MarkType::Symbol)
        .enter(|props| {
            props.set(Channel::Fill, ValueRefSpec::new().scale("inner").value("A"))?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();
    let group = ctx
        .mark(MarkType::Group)
        .scales([inner])
        .unwrap()
        .marks([dot.clone()])
        .unwrap()
        .build()
        .unwrap();

    let nested = ctx.visualization().marks([group.clone()]).build().unwrap();
    assert!(nested.dangling_references().unwrap().is_empty());

    let stray = ctx.visualization().marks([group, dot]).build().unwrap();
    assert_eq!(stray.dangling_references().unwrap(), vec!["Scale inner"]);
}

#[test]
fn test_padding_is_idempotent() {
    let ctx = BuildContext::with_config(BuilderConfig {
        check_references: false,
        ..Default::default()
    });
    let padding = json!({"top": 1, "left": 2, "right": 3, "bottom": 4});
    let once = ctx
        .visualization()
        .padding_value(&padding)
        .unwrap()
        .build()
        .unwrap()
        .to_spec();
    let twice = ctx
        .visualization()
        .padding_value(&padding)
        .unwrap()
        .padding_value(&once["padding"])
        .unwrap()
        .build()
        .unwrap()
        .to_spec();
    assert_eq!(once["padding"], padding);
    assert_eq!(once, twice);
}

#[test]
fn test_uniform_padding_matches_object_padding() {
    let ctx = BuildContext::new();
    let uniform = ctx.visualization().padding(5).build().unwrap().to_spec();
    let object = ctx
        .visualization()
        .padding_value(&json!({"top": 5, "left": 5, "right": 5, "bottom": 5}))
        .unwrap()
        .build()
        .unwrap()
        .to_spec();
    assert_eq!(uniform, object);
}

#[test]
fn test_minimal_bar_chart() {
    let ctx = BuildContext::new();
    let table = ctx
        .data("table")
        .values(json!([{"x": 1, "y": 2}, {"x": 2, "y": 3}]))
        .unwrap()
        .build()
        .unwrap();
    let x = ctx
        .scale("x", ScaleType::Ordinal)
        .domain("table.x")
        .unwrap()
        .build()
        .unwrap();
    let y = ctx
        .scale("y", ScaleType::Linear)
        .domain("table.y")
        .unwrap()
        .build()
        .unwrap();
    let rect = ctx
        .mark(MarkType::Rect)
        .from_data(&table)
        .unwrap()
        .enter(|props| {
            props
                .set(Channel::X, ValueRefSpec::new().scale("x").field("x"))?
                .set(Channel::Y, ValueRefSpec::new().scale("y").field("y"))?;
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();
    let spec = ctx
        .visualization()
        .data([table])
        .scales([x, y])
        .marks([rect])
        .build()
        .unwrap()
        .to_spec();

    assert_eq!(spec["data"][0]["name"], json!("table"));
    let scale_names: Vec<_> = spec["scales"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].clone())
        .collect();
    assert_eq!(scale_names, vec![json!("x"), json!("y")]);
    assert_eq!(spec["marks"][0]["type"], json!("rect"));
    assert_eq!(spec["marks"][0]["properties"]["enter"]["x"]["scale"], json!("x"));
    assert_eq!(spec["marks"][0]["properties"]["enter"]["x"]["field"], json!("data.x"));
}
