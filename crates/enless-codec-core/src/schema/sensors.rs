use super::streams::DataStream;

use super::streams::DataStream::{
    Co2, Current, Humidity, PulseCh1, PulseCh2, PulseOc, Temp1, Temp2, Voc,
};

/// Number of sensor-type codes with a schema row (codes `0..SENSOR_TYPE_COUNT`).
pub const SENSOR_TYPE_COUNT: usize = 18;

const PULSE_COUNTERS: &[DataStream] = &[PulseCh1, PulseCh2, PulseOc];

/// Ordered stream list per sensor-type code; the index is the code.
static SENSOR_SCHEMAS: [&[DataStream]; SENSOR_TYPE_COUNT] = [
    &[],
    &[],
    &[],
    &[],
    &[Temp1, Humidity],
    &[Temp1, Humidity, Voc],
    &[Temp1, Humidity, Voc, Co2],
    &[Temp1],
    PULSE_COUNTERS,
    PULSE_COUNTERS,
    PULSE_COUNTERS,
    PULSE_COUNTERS,
    &[Temp1, Temp2],
    &[Current],
    &[Temp1, Humidity],
    &[Temp1],
    &[Temp1],
    &[Temp1, Temp2],
];

/// Streams carried by a frame of the given sensor type, in wire order.
///
/// Codes without a schema row yield an empty list rather than an error.
///
/// # Examples
/// ```
/// use enless_codec_core::schema::{DataStream, streams_for};
///
/// assert_eq!(streams_for(13), &[DataStream::Current]);
/// assert!(streams_for(200).is_empty());
/// ```
pub fn streams_for(sensor_type: u8) -> &'static [DataStream] {
    SENSOR_SCHEMAS
        .get(sensor_type as usize)
        .copied()
        .unwrap_or(&[])
}

/// Payload length (after the header) implied by a sensor type's schema.
pub fn payload_len(sensor_type: u8) -> usize {
    streams_for(sensor_type)
        .iter()
        .map(|stream| stream.field_spec().width)
        .sum()
}

/// Product name for sensor types the platform documents.
pub fn sensor_label(sensor_type: u8) -> Option<&'static str> {
    match sensor_type {
        12 => Some("twin-temperature kit"),
        13 => Some("4-20 mA input kit"),
        _ => None,
    }
}
