use std::fmt;

use serde::{Deserialize, Serialize};

/// Named measurement channel carried by a frame.
///
/// The serialized form is the snake_case name used by the device platform
/// (`temp1`, `pulse_ch1`, ...). Ordering follows declaration order, which is
/// also the order streams appear in every sensor schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStream {
    Temp1,
    Temp2,
    Humidity,
    Voc,
    Co2,
    PulseCh1,
    PulseCh2,
    PulseOc,
    Current,
}

impl DataStream {
    pub const ALL: [DataStream; 9] = [
        DataStream::Temp1,
        DataStream::Temp2,
        DataStream::Humidity,
        DataStream::Voc,
        DataStream::Co2,
        DataStream::PulseCh1,
        DataStream::PulseCh2,
        DataStream::PulseOc,
        DataStream::Current,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataStream::Temp1 => "temp1",
            DataStream::Temp2 => "temp2",
            DataStream::Humidity => "humidity",
            DataStream::Voc => "voc",
            DataStream::Co2 => "co2",
            DataStream::PulseCh1 => "pulse_ch1",
            DataStream::PulseCh2 => "pulse_ch2",
            DataStream::PulseOc => "pulse_oc",
            DataStream::Current => "current",
        }
    }

    /// Encoding parameters for this stream.
    ///
    /// The same stream decodes identically under every sensor type.
    ///
    /// # Examples
    /// ```
    /// use enless_codec_core::schema::DataStream;
    ///
    /// let spec = DataStream::PulseCh1.field_spec();
    /// assert_eq!(spec.width, 4);
    /// assert!(!spec.signed);
    /// ```
    pub fn field_spec(self) -> FieldSpec {
        match self {
            DataStream::Temp1 | DataStream::Temp2 => FieldSpec {
                signed: true,
                scale: 0.1,
                ..FieldSpec::default()
            },
            DataStream::Humidity => FieldSpec {
                scale: 0.1,
                ..FieldSpec::default()
            },
            DataStream::Voc | DataStream::Co2 => FieldSpec::default(),
            DataStream::PulseCh1 | DataStream::PulseCh2 | DataStream::PulseOc => FieldSpec {
                width: 4,
                ..FieldSpec::default()
            },
            DataStream::Current => FieldSpec {
                scale: 0.001,
                ..FieldSpec::default()
            },
        }
    }
}

impl fmt::Display for DataStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire encoding of one data stream.
///
/// `Default` yields the platform defaults: 2 bytes, unsigned, scale 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Number of big-endian bytes to read.
    pub width: usize,
    /// Two's-complement sign extension over `width * 8` bits.
    pub signed: bool,
    /// Factor applied after sign extension.
    pub scale: f64,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            width: 2,
            signed: false,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataStream, FieldSpec};

    #[test]
    fn defaults_are_two_bytes_unsigned_unscaled() {
        let spec = FieldSpec::default();
        assert_eq!(spec.width, 2);
        assert!(!spec.signed);
        assert_eq!(spec.scale, 1.0);
    }

    #[test]
    fn temperatures_are_signed_tenths() {
        for stream in [DataStream::Temp1, DataStream::Temp2] {
            let spec = stream.field_spec();
            assert_eq!(spec.width, 2);
            assert!(spec.signed);
            assert_eq!(spec.scale, 0.1);
        }
    }

    #[test]
    fn pulse_counters_are_four_bytes() {
        for stream in [
            DataStream::PulseCh1,
            DataStream::PulseCh2,
            DataStream::PulseOc,
        ] {
            assert_eq!(stream.field_spec().width, 4);
        }
    }

    #[test]
    fn current_is_scaled_to_milliamps() {
        let spec = DataStream::Current.field_spec();
        assert_eq!(spec.scale, 0.001);
        assert!(!spec.signed);
    }

    #[test]
    fn serializes_as_platform_name() {
        let value = serde_json::to_value(DataStream::PulseOc).expect("stream json");
        assert_eq!(value, serde_json::json!("pulse_oc"));
    }
}
