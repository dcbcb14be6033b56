use crate::DecodedMeasurement;
use crate::schema::ValidityRule;

/// Interpret `value`, read over `width` bytes, as two's complement when
/// `signed` is set.
///
/// Only values strictly greater than `2^(width*8 - 1)` are negated, so the
/// half-range value itself stays positive (`0x8000` over two bytes decodes to
/// +32768). Deployed consumers rely on this boundary; keep it.
///
/// # Examples
/// ```
/// use enless_codec_core::protocols::uplink::value::sign_extend;
///
/// assert_eq!(sign_extend(0xffc9, 2, true), -55);
/// assert_eq!(sign_extend(0xffc9, 2, false), 0xffc9);
/// assert_eq!(sign_extend(0x8000, 2, true), 0x8000);
/// ```
pub fn sign_extend(value: u64, width: usize, signed: bool) -> i128 {
    let value = i128::from(value);
    if !signed || width == 0 {
        return value;
    }
    let half = 1i128 << (width * 8 - 1);
    if value > half { value - 2 * half } else { value }
}

/// Apply `scale` and round the result to one decimal place.
///
/// The product is formed as `(value * scale) * 10` and rounded half toward
/// positive infinity before dividing by ten, whatever precision `scale`
/// implies.
///
/// # Examples
/// ```
/// use enless_codec_core::protocols::uplink::value::scale_and_round;
///
/// assert_eq!(scale_and_round(1234, 0.001), 1.2);
/// assert_eq!(scale_and_round(-55, 0.1), -5.5);
/// ```
pub fn scale_and_round(value: i128, scale: f64) -> f64 {
    round_half_up(value as f64 * scale * 10.0) / 10.0
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Build the measurement for one field, discarding values the sensor type's
/// rule rejects.
pub fn apply_validity(value: f64, rule: Option<&ValidityRule>) -> DecodedMeasurement {
    match rule {
        Some(rule) if !rule.accepts(value) => DecodedMeasurement::rejected(rule.tag),
        _ => DecodedMeasurement::value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_validity, round_half_up, scale_and_round, sign_extend};
    use crate::schema::{SENSOR_BROKEN, validity_rule};

    #[test]
    fn half_range_boundary_stays_positive() {
        // 0x8000 == half; only values above it are negated.
        assert_eq!(sign_extend(0x8000, 2, true), 32768);
    }

    #[test]
    fn just_above_half_range_is_negated() {
        assert_eq!(sign_extend(0x8001, 2, true), -32767);
        assert_eq!(sign_extend(0xffff, 2, true), -1);
    }

    #[test]
    fn unsigned_fields_are_untouched() {
        assert_eq!(sign_extend(0xffff, 2, false), 0xffff);
        assert_eq!(sign_extend(0xffff_ffff, 4, false), 0xffff_ffff);
    }

    #[test]
    fn sign_extension_over_four_bytes() {
        assert_eq!(sign_extend(0xffff_fffe, 4, true), -2);
        assert_eq!(sign_extend(0x8000_0000, 4, true), 0x8000_0000);
    }

    #[test]
    fn sign_extension_over_eight_bytes() {
        assert_eq!(sign_extend(u64::MAX, 8, true), -1);
    }

    #[test]
    fn scaling_rounds_to_one_decimal() {
        assert_eq!(scale_and_round(1234, 0.001), 1.2);
        assert_eq!(scale_and_round(1250, 0.001), 1.3);
        assert_eq!(scale_and_round(215, 0.1), 21.5);
        assert_eq!(scale_and_round(420, 1.0), 420.0);
    }

    #[test]
    fn negative_values_round_toward_positive_infinity() {
        assert_eq!(round_half_up(-12.5), -12.0);
        assert_eq!(round_half_up(-12.6), -13.0);
        assert_eq!(round_half_up(12.5), 13.0);
        assert_eq!(scale_and_round(-32767, 0.1), -3276.7);
    }

    #[test]
    fn out_of_range_reading_is_tagged_without_value() {
        let measurement = apply_validity(500.0, validity_rule(12));
        assert_eq!(measurement.v, None);
        assert!(measurement.e.contains_key(SENSOR_BROKEN));
    }

    #[test]
    fn in_range_reading_passes_through() {
        let measurement = apply_validity(10.0, validity_rule(13));
        assert_eq!(measurement.v, Some(10.0));
        assert!(measurement.e.is_empty());
    }

    #[test]
    fn unbounded_sensor_type_passes_anything() {
        let measurement = apply_validity(9999.0, validity_rule(4));
        assert_eq!(measurement.v, Some(9999.0));
        assert!(measurement.e.is_empty());
    }
}
