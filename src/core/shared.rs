pub trait ConfigType {
    fn default() -> Self;
}

/// Formats a decoded component for display. Integer data is printed exactly,
/// float data (including normalized integers) is printed as the shortest `f32`
/// representation that still reads back to the same value.
pub fn format_component(value: f64, is_float: bool) -> String {
    if is_float {
        format!("{:?}", value as f32)
    } else {
        // integer components up to 32 bits are exact in f64
        format!("{}", value as i64)
    }
}

/// Formats a run of components as a parenthesized, comma separated tuple.
pub fn format_components(values: &[f64], is_float: bool) -> String {
    let inner = values.iter()
        .map(|&v| format_component(v, is_float))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({})", inner)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_decimal_part() {
        assert_eq!(format_component(12345.0, false), "12345");
        assert_eq!(format_component(-7.0, false), "-7");
        assert_eq!(format_component(4294967295.0, false), "4294967295");
    }

    #[test]
    fn floats_round_trip_through_f32() {
        assert_eq!(format_component(1.0, true), "1.0");
        assert_eq!(format_component(0.1f32 as f64, true), "0.1");
        assert_eq!(format_component(127.0 / 128.0, true), "0.9921875");
    }

    #[test]
    fn tuples() {
        assert_eq!(format_components(&[1.0, 2.0, 3.0], false), "(1, 2, 3)");
        assert_eq!(format_components(&[0.5, -1.0], true), "(0.5, -1.0)");
        assert_eq!(format_components(&[], true), "()");
    }
}
