use log::{debug, info};

use crate::source::{FrameEvent, FrameSource};
use crate::{BatchEntry, BatchReport, DEFAULT_GENERATED_AT};

use super::{DecodeError, decode_bytes_at, timestamp_to_rfc3339};

/// Decode every frame of `source` under one timestamp key.
///
/// A frame that fails structurally is recorded on its entry and the batch
/// continues; a failing source aborts the batch.
pub fn decode_source<S: FrameSource>(
    mut source: S,
    timestamp_ms: i64,
) -> Result<BatchReport, DecodeError> {
    let mut entries = Vec::new();
    while let Some(FrameEvent { line, bytes }) = source.next_frame()? {
        entries.push(decode_entry(line, &bytes, timestamp_ms));
    }

    let rejected = entries.iter().filter(|entry| entry.error.is_some()).count();
    info!("decoded {} frames ({} rejected)", entries.len(), rejected);

    Ok(BatchReport {
        generated_at: timestamp_to_rfc3339(timestamp_ms)
            .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string()),
        entries,
    })
}

fn decode_entry(line: usize, bytes: &[u8], timestamp_ms: i64) -> BatchEntry {
    match decode_bytes_at(bytes, timestamp_ms) {
        Ok(data) => BatchEntry {
            line,
            data: Some(data),
            error: None,
        },
        Err(err) => {
            debug!("line {line}: {err}");
            BatchEntry {
                line,
                data: None,
                error: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::decode_source;
    use crate::source::{FrameEvent, FrameSource, HexLineSource, SourceError};
    use crate::{DEFAULT_GENERATED_AT, DecodeError};

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError> {
            Err(SourceError::Hex {
                line: 1,
                message: "odd number of digits".to_string(),
            })
        }
    }

    #[test]
    fn rejected_frames_do_not_abort_batch() {
        let text = "0012340d00002710\n0012340400\n00123407000000d7\n";
        let report = decode_source(HexLineSource::new(Cursor::new(text)), 0).unwrap();

        assert_eq!(report.generated_at, DEFAULT_GENERATED_AT);
        assert_eq!(report.entries.len(), 3);
        assert!(report.entries[0].data.is_some());
        assert_eq!(report.entries[1].line, 2);
        assert!(
            report.entries[1]
                .error
                .as_deref()
                .unwrap()
                .contains("payload too short")
        );
        assert!(report.entries[2].error.is_none());
        assert!(report.has_errors());
    }

    #[test]
    fn source_errors_abort_batch() {
        let err = decode_source(FailingSource, 0).unwrap_err();
        assert!(matches!(err, DecodeError::Source(SourceError::Hex { line: 1, .. })));
    }
}
