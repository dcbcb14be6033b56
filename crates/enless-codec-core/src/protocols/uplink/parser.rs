use log::{debug, warn};
use serde::Serialize;

use super::error::FrameError;
use super::layout;
use super::reader::FrameReader;
use super::value::{apply_validity, scale_and_round, sign_extend};
use crate::DecodedMeasurement;
use crate::schema::{self, DataStream};

/// Decoded uplink frame: header plus one reading per schema stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// 24-bit transmitter identifier from bytes 0-2.
    pub transmitter_id: u32,
    /// Sensor-type code selecting the schema.
    pub sensor_type: u8,
    /// Reserved header bytes 4-5, carried for inspection only.
    pub reserved: u16,
    /// Readings in schema order.
    pub fields: Vec<FieldReading>,
}

/// One decoded field with its intermediate values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReading {
    pub stream: DataStream,
    /// Byte offset of the field within the frame.
    pub offset: usize,
    /// Unsigned big-endian value as read from the wire.
    pub raw: u64,
    /// Value after sign extension, scaling and rounding, before validity.
    pub scaled: f64,
    pub measurement: DecodedMeasurement,
}

/// Decode an uplink frame.
///
/// Returns `Ok(None)` for an empty payload. Sensor types without a schema row
/// decode to a frame with no fields.
///
/// # Errors
/// `FrameError::TooShort` when the header or the schema payload is truncated.
pub fn parse_frame(payload: &[u8]) -> Result<Option<Frame>, FrameError> {
    let reader = FrameReader::new(payload);
    if reader.is_empty() {
        return Ok(None);
    }
    reader.require_len(layout::HEADER_LEN)?;

    let transmitter_id = reader.read_transmitter_id()?;
    let sensor_type = reader.read_u8(layout::SENSOR_TYPE_OFFSET)?;
    let reserved = reader.read_reserved()?;

    let streams = schema::streams_for(sensor_type);
    if usize::from(sensor_type) >= schema::SENSOR_TYPE_COUNT {
        warn!("undefined sensor type {sensor_type} from transmitter {transmitter_id:06x}");
    }

    let needed = layout::FIELDS_OFFSET + schema::payload_len(sensor_type);
    reader.require_len(needed)?;

    let rule = schema::validity_rule(sensor_type);
    let mut offset = layout::FIELDS_OFFSET;
    let mut fields = Vec::with_capacity(streams.len());
    for &stream in streams {
        let spec = stream.field_spec();
        let raw = reader.read_uint_be(offset, spec.width)?;
        let scaled = scale_and_round(sign_extend(raw, spec.width, spec.signed), spec.scale);
        let measurement = apply_validity(scaled, rule);
        if !measurement.e.is_empty() {
            debug!("sensor type {sensor_type}: rejected {stream} reading {scaled}");
        }
        fields.push(FieldReading {
            stream,
            offset,
            raw,
            scaled,
            measurement,
        });
        offset += spec.width;
    }

    if reader.len() > offset {
        debug!(
            "ignoring {} trailing bytes after sensor type {sensor_type} payload",
            reader.len() - offset
        );
    }

    Ok(Some(Frame {
        transmitter_id,
        sensor_type,
        reserved,
        fields,
    }))
}
