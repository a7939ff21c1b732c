/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub default_width: u32,
    pub default_height: u32,
    pub default_padding: i64,

    /// Warn when a compiled visualization refers to data or scales that it
    /// does not contain
    pub check_references: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_width: 500,
            default_height: 500,
            default_padding: 5,
            check_references: true,
        }
    }
}
