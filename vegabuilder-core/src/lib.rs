/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
#[macro_use]
extern crate lazy_static;

pub mod attributes;
pub mod config;
pub mod context;
pub mod field;
pub mod registry;
pub mod spec;

pub use context::BuildContext;
pub use vegabuilder_common::error;
