//! Static schema tables for Enless transmitters.
//!
//! A frame carries no per-field tags or offsets: the sensor-type code in the
//! header selects an ordered list of data streams, and each stream has one
//! fixed encoding. Both tables live here as `static` data, alongside the
//! validity ranges that apply to some sensor types.
//!
//! - `streams`: data-stream names and their `FieldSpec`
//! - `sensors`: sensor-type code to ordered stream list
//! - `validity`: sensor-type code to optional accepted range
//!
//! Version française (résumé):
//! Les tables de schéma sont des données statiques : code de type capteur ->
//! liste ordonnée de flux, flux -> paramètres d'encodage, et plages de
//! validité par type capteur.

pub mod sensors;
pub mod streams;
pub mod validity;

pub use sensors::{SENSOR_TYPE_COUNT, payload_len, sensor_label, streams_for};
pub use streams::{DataStream, FieldSpec};
pub use validity::{SENSOR_BROKEN, ValidityRule, validity_rule};

use crate::protocols::uplink::layout;
use crate::{SensorSchemaSummary, StreamSummary};

/// Describe the schema row of one sensor type, with field offsets.
///
/// # Examples
/// ```
/// use enless_codec_core::schema::describe;
///
/// let summary = describe(12);
/// assert_eq!(summary.streams.len(), 2);
/// assert_eq!(summary.streams[1].offset, 8);
/// assert!(summary.validity.is_some());
/// ```
pub fn describe(sensor_type: u8) -> SensorSchemaSummary {
    let mut offset = layout::FIELDS_OFFSET;
    let streams = streams_for(sensor_type)
        .iter()
        .map(|&stream| {
            let spec = stream.field_spec();
            let summary = StreamSummary {
                stream,
                offset,
                spec,
            };
            offset += spec.width;
            summary
        })
        .collect();
    SensorSchemaSummary {
        sensor_type,
        label: sensor_label(sensor_type),
        streams,
        validity: validity_rule(sensor_type).copied(),
    }
}

/// Describe every sensor type with a schema row, in code order.
pub fn describe_all() -> Vec<SensorSchemaSummary> {
    (0..SENSOR_TYPE_COUNT as u8).map(describe).collect()
}
