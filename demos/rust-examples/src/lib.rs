/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use env_logger::{Builder, Target};
use std::sync::Once;

static INIT: Once = Once::new();

/// Log to stdout, filtered by `RUST_LOG`
pub fn initialize_logging() {
    INIT.call_once(|| {
        let mut builder = Builder::from_default_env();
        builder.target(Target::Stdout);
        builder.init();
        log::debug!("Logging initialized");
    });
}
