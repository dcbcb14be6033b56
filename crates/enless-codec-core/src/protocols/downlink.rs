//! Downlink command encoding.
//!
//! The configuration command format for Enless transmitters is not
//! documented, so the encoder always answers with a single zero byte and
//! ignores its input. Callers can detect the placeholder through
//! `PLACEHOLDER_PAYLOAD`.

use log::debug;

use crate::{DownlinkInput, DownlinkOutput};

/// Payload returned for every downlink request.
pub const PLACEHOLDER_PAYLOAD: [u8; 1] = [0];

/// Encode a downlink command.
///
/// # Examples
/// ```
/// use enless_codec_core::{DownlinkInput, encode_downlink};
///
/// let output = encode_downlink(&DownlinkInput::default());
/// assert_eq!(output.bytes, vec![0]);
/// ```
pub fn encode_downlink(input: &DownlinkInput) -> DownlinkOutput {
    debug!(
        "downlink encoding not implemented; ignoring data and {} variables",
        input.variables.len()
    );
    DownlinkOutput {
        bytes: PLACEHOLDER_PAYLOAD.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::{PLACEHOLDER_PAYLOAD, encode_downlink};
    use crate::DownlinkInput;

    #[test]
    fn encode_ignores_input() {
        let inputs = [
            DownlinkInput::default(),
            DownlinkInput {
                data: json!({ "interval": 600, "channels": [1, 2] }),
                variables: BTreeMap::from([("key".to_string(), "value".to_string())]),
            },
            DownlinkInput {
                data: json!("reboot"),
                variables: BTreeMap::new(),
            },
        ];
        for input in &inputs {
            assert_eq!(encode_downlink(input).bytes, PLACEHOLDER_PAYLOAD.to_vec());
        }
    }

    #[test]
    fn encode_output_json_shape() {
        let value = serde_json::to_value(encode_downlink(&DownlinkInput::default()))
            .expect("downlink json");
        assert_eq!(value, json!({ "bytes": [0] }));
    }
}
