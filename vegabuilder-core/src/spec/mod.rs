/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
pub mod axis;
pub mod data;
pub mod mark;
pub mod scale;
pub mod transform;
pub mod value_ref;
pub mod values;
pub mod visitors;
pub mod visualization;
