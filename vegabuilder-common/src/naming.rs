/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use heck::{ToLowerCamelCase, ToSnakeCase};

/// Convert a builder attribute name (snake_case) to the name used in the Vega
/// JSON document (camelCase). Names without underscores are returned as is.
pub fn to_camel_case(name: &str) -> String {
    if !name.contains('_') {
        return name.to_string();
    }
    name.to_lower_camel_case()
}

/// Convert a camelCase name back to snake_case
pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}

#[cfg(test)]
mod tests {
    use crate::naming::{to_camel_case, to_snake_case};

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("stroke_dash_offset"), "strokeDashOffset");
        assert_eq!(to_camel_case("tick_size_major"), "tickSizeMajor");
        assert_eq!(to_camel_case("fill"), "fill");
        assert_eq!(to_camel_case("x2"), "x2");
        assert_eq!(to_camel_case("diagonalX"), "diagonalX");
        assert_eq!(to_camel_case("Count"), "Count");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("startAngle"), "start_angle");
        assert_eq!(to_snake_case("key"), "key");
        assert_eq!(to_snake_case("strokeDashOffset"), "stroke_dash_offset");
    }
}
