/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Attribute model shared by every builder entity.
//!
//! Entities expose their attributes in declaration order under their internal
//! snake_case names. [`collect_attributes`] walks the defined attributes
//! depth-first and renames them to the camelCase names used by the Vega
//! document. Storage never holds the camelCase form.
use serde::Serialize;
use serde_json::{Map, Value};
use vegabuilder_common::error::{Result, VegaBuilderError};
use vegabuilder_common::naming::to_camel_case;

pub trait Serializable {
    /// Attributes in declaration order, keyed by internal name
    fn attributes(&self) -> Vec<(String, Attribute<'_>)>;
}

pub enum Attribute<'a> {
    Undefined,
    Value(Value),
    Node(&'a dyn Serializable),
    List(Vec<Attribute<'a>>),
    Map(Vec<(String, Attribute<'a>)>),
}

impl<'a> Attribute<'a> {
    pub fn value<T: Into<Value>>(value: Option<T>) -> Self {
        match value {
            Some(value) => Attribute::Value(value.into()),
            None => Attribute::Undefined,
        }
    }

    pub fn node<S: Serializable>(node: Option<&'a S>) -> Self {
        match node {
            Some(node) => Attribute::Node(node),
            None => Attribute::Undefined,
        }
    }

    /// Empty lists are left undefined
    pub fn nodes<S: Serializable>(nodes: &'a [S]) -> Self {
        if nodes.is_empty() {
            Attribute::Undefined
        } else {
            Attribute::List(
                nodes
                    .iter()
                    .map(|node| Attribute::Node(node as &dyn Serializable))
                    .collect(),
            )
        }
    }
}

impl std::fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Undefined => write!(f, "Undefined"),
            Attribute::Value(value) => write!(f, "Value({value})"),
            Attribute::Node(node) => write!(f, "Node({})", collect_attributes(*node)),
            Attribute::List(items) => f.debug_list().entries(items).finish(),
            Attribute::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}

/// Recursively collect the defined attributes of a node into a JSON object
pub fn collect_attributes<S: Serializable + ?Sized>(node: &S) -> Value {
    let mut collected = Map::new();
    for (name, attribute) in node.attributes() {
        if let Some(value) = collect_attribute(attribute) {
            collected.insert(to_camel_case(&name), value);
        }
    }
    Value::Object(collected)
}

fn collect_attribute(attribute: Attribute<'_>) -> Option<Value> {
    match attribute {
        Attribute::Undefined | Attribute::Value(Value::Null) => None,
        Attribute::Value(value) => Some(value),
        Attribute::Node(node) => Some(collect_attributes(node)),
        Attribute::List(items) => Some(Value::Array(
            items.into_iter().filter_map(collect_attribute).collect(),
        )),
        Attribute::Map(entries) => {
            let mut collected = Map::new();
            for (name, attribute) in entries {
                if let Some(value) = collect_attribute(attribute) {
                    collected.insert(to_camel_case(&name), value);
                }
            }
            Some(Value::Object(collected))
        }
    }
}

/// Expose the fields of a serde-serializable struct as attributes. Field names
/// are taken from the serde representation and rewritten during the walk like
/// any other attribute name.
pub fn serialize_fields<T: Serialize>(value: &T) -> Vec<(String, Attribute<'static>)> {
    // Structs with string keys always serialize to an object
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .map(|(name, value)| (name, Attribute::Value(value)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Boolean attribute set in DSL style: calling the setter marks it true
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(Option<bool>);

impl Flag {
    pub fn set(&mut self) {
        self.0 = Some(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.unwrap_or(false)
    }

    pub fn attribute(&self) -> Attribute<'static> {
        Attribute::value(self.0)
    }
}

/// Accept exactly one argument and pass it through `transform`
pub fn single_value<T, U, F>(name: &str, args: Vec<T>, transform: F) -> Result<U>
where
    F: FnOnce(T) -> Result<U>,
{
    if args.len() != 1 {
        return Err(VegaBuilderError::invalid_input(format!(
            "Attribute {name} expects exactly one value, received {}",
            args.len()
        )));
    }
    match args.into_iter().next() {
        Some(arg) => transform(arg),
        None => Err(VegaBuilderError::internal("Argument list emptied")),
    }
}

/// Flatten nested arrays into one list of values
pub fn flatten_values<I>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut flat = Vec::new();
    for arg in args {
        match arg {
            Value::Array(items) => flat.extend(flatten_values(items)),
            other => flat.push(other),
        }
    }
    flat
}

/// Accept one array or several values, flattened, and pass them through
/// `transform`
pub fn multi_value<I, U, F>(name: &str, args: I, transform: F) -> Result<U>
where
    I: IntoIterator<Item = Value>,
    F: FnOnce(&str, Vec<Value>) -> Result<U>,
{
    transform(name, flatten_values(args))
}

pub fn exact_arity<T>(name: &str, values: &[T], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(VegaBuilderError::invalid_input(format!(
            "Attribute {name} expects {expected} values, received {}",
            values.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Inner {
        stroke_width: Option<f64>,
    }

    impl Serializable for Inner {
        fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
            vec![("stroke_width".to_string(), Attribute::value(self.stroke_width))]
        }
    }

    struct Outer {
        name: Option<String>,
        inner: Inner,
        items: Vec<Inner>,
        reverse: Flag,
    }

    impl Serializable for Outer {
        fn attributes(&self) -> Vec<(String, Attribute<'_>)> {
            vec![
                ("name".to_string(), Attribute::value(self.name.clone())),
                ("inner_node".to_string(), Attribute::Node(&self.inner)),
                ("items".to_string(), Attribute::nodes(&self.items)),
                ("reverse".to_string(), self.reverse.attribute()),
            ]
        }
    }

    #[test]
    fn test_collect_skips_undefined_and_renames() {
        let mut outer = Outer {
            name: None,
            inner: Inner {
                stroke_width: Some(2.0),
            },
            items: vec![Inner { stroke_width: None }],
            reverse: Flag::default(),
        };
        assert_eq!(
            collect_attributes(&outer),
            json!({"innerNode": {"strokeWidth": 2.0}, "items": [{}]})
        );

        outer.reverse.set();
        outer.name = Some("vis".to_string());
        let collected = collect_attributes(&outer);
        assert_eq!(collected["name"], json!("vis"));
        assert_eq!(collected["reverse"], json!(true));
    }

    #[test]
    fn test_single_value_arity() {
        assert_eq!(single_value("ticks", vec![5], Ok).unwrap(), 5);
        assert!(single_value("ticks", vec![5, 6], Ok).is_err());
        assert!(single_value("ticks", Vec::<i32>::new(), Ok).is_err());
    }

    #[test]
    fn test_multi_value_flattens() {
        let values = multi_value("values", vec![json!([1, [2, 3]]), json!(4)], |_, v| Ok(v))
            .unwrap();
        assert_eq!(values, vec![json!(1), json!(2), json!(3), json!(4)]);
    }
}
