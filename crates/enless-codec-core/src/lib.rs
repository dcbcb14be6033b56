//! Enless codec core library for transmitter telemetry frames.
//!
//! This crate decodes the fixed-layout uplink frames sent by Enless
//! multi-sensor transmitters into named measurements, in the document shape
//! the device platform expects (`{ "data": { "<ts>": { "<stream>": ... } } }`).
//! The sensor-type code in the frame header selects a static schema: which
//! streams follow, in what order, at what width and scale, and which range a
//! reading must fall in. Decoding is byte-oriented and side-effect free; file
//! access lives in `source`, wall-clock reads in the `codec` entry points.
//!
//! Invariants:
//! - Every field of a schema is read, in order, even when its value is
//!   rejected; the cursor always advances by the field width.
//! - Truncated frames fail the whole decode; implausible readings never do.
//! - Error tags are per field and never carried over to the next field.
//!
//! Version française (résumé):
//! Cette crate décode les trames montantes des transmetteurs Enless en mesures
//! nommées : le code de type capteur choisit un schéma statique (flux, ordre,
//! largeur, échelle, plage valide). Les trames tronquées sont rejetées, les
//! mesures hors plage sont marquées sans interrompre le décodage.
//!
//! # Examples
//! ```
//! use enless_codec_core::{UplinkInput, decode_uplink_at};
//!
//! let input = UplinkInput {
//!     bytes: Some(vec![0x00, 0x12, 0x34, 0x07, 0x00, 0x00, 0x00, 0xd7]),
//!     ..UplinkInput::default()
//! };
//! let output = decode_uplink_at(&input, 1_700_000_000_000)?;
//! let json = serde_json::to_value(&output)?;
//! assert_eq!(json["data"]["1700000000000"]["temp1"]["v"], 21.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod codec;
pub mod protocols;
pub mod schema;
mod source;

pub use codec::{
    DecodeError, decode_bytes_at, decode_source, decode_uplink, decode_uplink_at,
    now_timestamp_ms,
};
pub use protocols::downlink::encode_downlink;
pub use protocols::uplink::{FieldReading, Frame, FrameError, parse_frame};
pub use schema::DataStream;
pub use source::{
    FrameEvent, FrameSource, HexFileSource, HexLineSource, SourceError, parse_hex_frame,
};

/// Timestamp used when a batch timestamp cannot be rendered.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Marker value for an error tag; serialized as an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMarker {}

/// Decoded value of one data stream.
///
/// A reading rejected by its sensor type's range check has no value and at
/// least one error tag.
///
/// # Examples
/// ```
/// use enless_codec_core::DecodedMeasurement;
///
/// let broken = DecodedMeasurement::rejected("Sensor broken");
/// assert!(broken.v.is_none());
/// assert!(broken.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedMeasurement {
    /// Scaled value, absent when rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    /// Transient error tags, keyed by tag text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub e: BTreeMap<String, ErrorMarker>,
}

impl DecodedMeasurement {
    pub fn value(v: f64) -> Self {
        Self {
            v: Some(v),
            e: BTreeMap::new(),
        }
    }

    pub fn rejected(tag: &str) -> Self {
        Self {
            v: None,
            e: BTreeMap::from([(tag.to_string(), ErrorMarker {})]),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.e.is_empty()
    }
}

/// Measurements of one frame, keyed by stream.
pub type Measurements = BTreeMap<DataStream, DecodedMeasurement>;

/// Uplink decode request as sent by the device platform.
///
/// `f_port` and `variables` are accepted for compatibility and do not affect
/// decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UplinkInput {
    /// Raw frame bytes; absent or empty decodes to an empty document.
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    /// LoRaWAN port of the uplink.
    #[serde(rename = "fPort", default, skip_serializing_if = "Option::is_none")]
    pub f_port: Option<u8>,
    /// Device variables configured on the platform.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Uplink decode result: timestamp key (unix milliseconds) to measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UplinkOutput {
    pub data: BTreeMap<String, Measurements>,
}

impl UplinkOutput {
    /// Iterate over every measurement of every timestamp.
    pub fn measurements(&self) -> impl Iterator<Item = (&DataStream, &DecodedMeasurement)> {
        self.data.values().flat_map(|row| row.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.measurements()
            .any(|(_, measurement)| measurement.has_errors())
    }
}

/// Downlink encode request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownlinkInput {
    /// Command document; its shape is not interpreted.
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Downlink encode result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownlinkOutput {
    pub bytes: Vec<u8>,
}

/// Result of decoding every frame of a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// RFC3339 rendering of the timestamp shared by all entries.
    pub generated_at: String,
    /// One entry per frame, in source order.
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(BatchEntry::has_errors)
    }
}

/// Outcome for a single frame of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// 1-based line number of the frame in its source.
    pub line: usize,
    /// Decoded document, when the frame is structurally valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UplinkOutput>,
    /// Structural error message, when the frame was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    /// True when the frame was rejected or any field carries an error tag.
    pub fn has_errors(&self) -> bool {
        self.error.is_some() || self.data.as_ref().is_some_and(UplinkOutput::has_errors)
    }
}

/// Schema row of one sensor type, as listed by tooling.
#[derive(Debug, Clone, Serialize)]
pub struct SensorSchemaSummary {
    pub sensor_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub streams: Vec<StreamSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<schema::ValidityRule>,
}

/// Encoding of one stream within a schema row.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSummary {
    pub stream: DataStream,
    pub offset: usize,
    #[serde(flatten)]
    pub spec: schema::FieldSpec,
}
