use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::protocols::uplink::{FrameError, parse_frame};
use crate::source::SourceError;
use crate::{Measurements, UplinkInput, UplinkOutput};

mod batch;

pub use batch::decode_source;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode an uplink request, keyed by the current wall-clock time.
pub fn decode_uplink(input: &UplinkInput) -> Result<UplinkOutput, DecodeError> {
    decode_uplink_at(input, now_timestamp_ms())
}

/// Decode an uplink request under an explicit timestamp key.
///
/// `f_port` and `variables` are accepted but do not influence decoding.
pub fn decode_uplink_at(
    input: &UplinkInput,
    timestamp_ms: i64,
) -> Result<UplinkOutput, DecodeError> {
    debug!(
        "uplink on fPort {:?} with {} variables",
        input.f_port,
        input.variables.len()
    );
    let bytes = input.bytes.as_deref().unwrap_or_default();
    decode_bytes_at(bytes, timestamp_ms)
}

/// Decode raw frame bytes under an explicit timestamp key.
///
/// # Examples
/// ```
/// use enless_codec_core::decode_bytes_at;
///
/// let output = decode_bytes_at(&[], 0)?;
/// assert!(output.data.is_empty());
/// # Ok::<(), enless_codec_core::DecodeError>(())
/// ```
pub fn decode_bytes_at(bytes: &[u8], timestamp_ms: i64) -> Result<UplinkOutput, DecodeError> {
    let Some(frame) = parse_frame(bytes)? else {
        return Ok(UplinkOutput::default());
    };
    debug!(
        "decoded {} fields for sensor type {} from transmitter {:06x}",
        frame.fields.len(),
        frame.sensor_type,
        frame.transmitter_id
    );

    let measurements: Measurements = frame
        .fields
        .into_iter()
        .map(|field| (field.stream, field.measurement))
        .collect();
    Ok(UplinkOutput {
        data: BTreeMap::from([(timestamp_ms.to_string(), measurements)]),
    })
}

/// Current wall-clock time in unix milliseconds.
pub fn now_timestamp_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

fn timestamp_to_rfc3339(timestamp_ms: i64) -> Option<String> {
    let nanos = i128::from(timestamp_ms) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::{decode_bytes_at, decode_uplink, decode_uplink_at, timestamp_to_rfc3339};
    use crate::{DataStream, DecodeError, FrameError, UplinkInput};

    const TS: i64 = 1_700_000_000_000;

    fn input(bytes: Option<Vec<u8>>) -> UplinkInput {
        UplinkInput {
            bytes,
            f_port: Some(1),
            variables: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_bytes_decode_to_empty_document() {
        let output = decode_uplink_at(&input(Some(Vec::new())), TS).unwrap();
        assert_eq!(serde_json::to_value(output).unwrap(), json!({ "data": {} }));
    }

    #[test]
    fn absent_bytes_decode_to_empty_document() {
        let output = decode_uplink(&input(None)).unwrap();
        assert!(output.data.is_empty());
    }

    #[test]
    fn measurements_are_keyed_by_timestamp() {
        let bytes = vec![0x00, 0x12, 0x34, 0x0c, 0x00, 0x00, 0x13, 0x88, 0x00, 0xdc];
        let output = decode_uplink_at(&input(Some(bytes)), TS).unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "data": {
                    "1700000000000": {
                        "temp1": { "e": { "Sensor broken": {} } },
                        "temp2": { "v": 22.0 }
                    }
                }
            })
        );
        assert!(output.has_errors());
    }

    #[test]
    fn unknown_sensor_type_yields_empty_row() {
        let bytes = vec![0x00, 0x12, 0x34, 0x02, 0x00, 0x00, 0x01, 0x02];
        let output = decode_bytes_at(&bytes, TS).unwrap();
        assert_eq!(output.data.len(), 1);
        assert!(output.data["1700000000000"].is_empty());
    }

    #[test]
    fn platform_parameters_do_not_change_output() {
        let bytes = vec![0x00, 0x12, 0x34, 0x0d, 0x00, 0x00, 0x27, 0x10];
        let plain = decode_uplink_at(&input(Some(bytes.clone())), TS).unwrap();
        let decorated = decode_uplink_at(
            &UplinkInput {
                bytes: Some(bytes),
                f_port: Some(42),
                variables: BTreeMap::from([("unit".to_string(), "mA".to_string())]),
            },
            TS,
        )
        .unwrap();
        assert_eq!(plain, decorated);
        let row = &plain.data["1700000000000"];
        assert_eq!(row[&DataStream::Current].v, Some(10.0));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let bytes = vec![0x00, 0x12, 0x34, 0x04, 0x00, 0x00, 0x00];
        let err = decode_uplink_at(&input(Some(bytes)), TS).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Frame(FrameError::TooShort {
                needed: 10,
                actual: 7
            })
        ));
    }

    #[test]
    fn rfc3339_rendering() {
        assert_eq!(
            timestamp_to_rfc3339(0).as_deref(),
            Some("1970-01-01T00:00:00Z")
        );
    }
}
