/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::spec::data::Data;
use crate::spec::scale::Scale;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrStringList {
    String(String),
    StringList(Vec<String>),
}

impl StringOrStringList {
    /// Apply `f` to every string, keeping the single/list shape
    pub fn map<F: Fn(&str) -> String>(&self, f: F) -> Self {
        match self {
            StringOrStringList::String(v) => StringOrStringList::String(f(v)),
            StringOrStringList::StringList(v) => {
                StringOrStringList::StringList(v.iter().map(|s| f(s)).collect())
            }
        }
    }
}

/// A Data given either by name or as a built entity. Either way only the name
/// is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReference(pub String);

impl DataReference {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DataReference {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<&String> for DataReference {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl From<String> for DataReference {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Data> for DataReference {
    fn from(data: &Data) -> Self {
        Self(data.name.clone())
    }
}

/// A Scale given by name or as a built entity. Names are checked against the
/// registry, entities are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleReference {
    Name(String),
    Object(String),
}

impl ScaleReference {
    pub fn name(&self) -> &str {
        match self {
            ScaleReference::Name(name) => name,
            ScaleReference::Object(name) => name,
        }
    }
}

impl From<&str> for ScaleReference {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<&String> for ScaleReference {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<String> for ScaleReference {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Scale> for ScaleReference {
    fn from(scale: &Scale) -> Self {
        Self::Object(scale.name.clone())
    }
}
