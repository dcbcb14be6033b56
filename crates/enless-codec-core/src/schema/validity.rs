use serde::Serialize;

/// Error tag attached when a reading falls outside its sensor's range.
pub const SENSOR_BROKEN: &str = "Sensor broken";

/// Accepted range for every reading of a sensor type.
///
/// Values strictly above `max` or strictly below `min` are discarded and
/// tagged with `tag`; the bounds themselves are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidityRule {
    pub min: f64,
    pub max: f64,
    pub tag: &'static str,
}

impl ValidityRule {
    pub fn accepts(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

static VALIDITY_RULES: &[(u8, ValidityRule)] = &[
    // twin-temperature kit, °C
    (
        12,
        ValidityRule {
            min: -100.0,
            max: 400.0,
            tag: SENSOR_BROKEN,
        },
    ),
    // 4-20 mA input kit, mA
    (
        13,
        ValidityRule {
            min: 3.6,
            max: 20.4,
            tag: SENSOR_BROKEN,
        },
    ),
];

/// Range check applied to readings of the given sensor type, if any.
///
/// # Examples
/// ```
/// use enless_codec_core::schema::validity_rule;
///
/// let rule = validity_rule(13).expect("4-20 mA kit is bounded");
/// assert!(rule.accepts(10.0));
/// assert!(!rule.accepts(21.0));
/// assert!(validity_rule(4).is_none());
/// ```
pub fn validity_rule(sensor_type: u8) -> Option<&'static ValidityRule> {
    VALIDITY_RULES
        .iter()
        .find(|(code, _)| *code == sensor_type)
        .map(|(_, rule)| rule)
}
