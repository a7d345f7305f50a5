//! Raw probe output → [`ProbeRecord`].

use crate::errors::{EntryError, EntryResult};
use crate::models::{ProbeRecord, StreamInfo, StreamKind};

use super::types::RawProbe;

/// Validate and convert raw probe output.
///
/// `fallback_name` is used when the probe does not report a filename
/// (normally the manifest location).
///
/// Fails with [`EntryError::InvalidTimingField`] on the first start time
/// that is missing, non-numeric or non-finite.
pub fn normalize(raw: &RawProbe, fallback_name: &str) -> EntryResult<ProbeRecord> {
    let container_start_time =
        parse_timing("format.start_time", raw.format.start_time.as_deref())?;

    let streams = raw
        .streams
        .iter()
        .enumerate()
        .map(|(i, stream)| {
            let field = format!("streams[{}].start_time", i);
            let start_time = parse_timing(&field, stream.start_time.as_deref())?;
            Ok(StreamInfo::new(
                StreamKind::from_codec_type(&stream.codec_type),
                stream.channels.unwrap_or(0),
                start_time,
            ))
        })
        .collect::<EntryResult<Vec<_>>>()?;

    let file_name = raw
        .format
        .filename
        .clone()
        .unwrap_or_else(|| fallback_name.to_string());

    Ok(ProbeRecord::new(file_name, container_start_time, streams))
}

/// Parse a decimal-seconds field.
///
/// A missing field is reported with an empty raw value. Zero means
/// "aligned", so nothing here may fall back to it.
fn parse_timing(field: &str, raw: Option<&str>) -> EntryResult<f64> {
    let raw = raw.unwrap_or("");
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EntryError::invalid_timing_field(field, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::types::{RawFormat, RawStream};

    fn raw(container: &str, streams: &[(&str, Option<u32>, &str)]) -> RawProbe {
        RawProbe {
            format: RawFormat {
                filename: Some("clip.mov".to_string()),
                start_time: Some(container.to_string()),
            },
            streams: streams
                .iter()
                .map(|(kind, channels, start)| RawStream {
                    codec_type: kind.to_string(),
                    channels: *channels,
                    start_time: Some(start.to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn normalizes_two_stream_probe() {
        let record = normalize(
            &raw(
                "0.000000",
                &[("video", None, "0.000000"), ("audio", Some(2), "0.500000")],
            ),
            "fallback",
        )
        .unwrap();

        assert_eq!(record.file_name(), "clip.mov");
        assert_eq!(record.container_start_time(), 0.0);
        assert_eq!(
            record.streams(),
            &[StreamInfo::video(0.0), StreamInfo::audio(2, 0.5)]
        );
        assert!(record.has_non_zero_timing());
    }

    #[test]
    fn preserves_stream_order() {
        let record = normalize(
            &raw(
                "0",
                &[
                    ("audio", Some(6), "0.1"),
                    ("subtitle", None, "0.2"),
                    ("video", None, "0.3"),
                ],
            ),
            "fallback",
        )
        .unwrap();

        let kinds: Vec<StreamKind> = record.streams().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StreamKind::Audio, StreamKind::Other, StreamKind::Video]
        );
        assert_eq!(record.stream_start_times(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn accepts_scientific_and_negative_values() {
        let record = normalize(
            &raw("1e-3", &[("video", None, "-0.042"), ("audio", Some(2), "2.5E1")]),
            "fallback",
        )
        .unwrap();

        assert_eq!(record.container_start_time(), 0.001);
        assert_eq!(record.stream_start_times(), vec![-0.042, 25.0]);
    }

    #[test]
    fn rejects_non_numeric_container_start() {
        let err = normalize(&raw("abc", &[]), "fallback").unwrap_err();
        match err {
            EntryError::InvalidTimingField { field, raw } => {
                assert_eq!(field, "format.start_time");
                assert_eq!(raw, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_stream_start_with_index() {
        let err = normalize(
            &raw("0", &[("video", None, "0"), ("audio", Some(2), "N/A")]),
            "fallback",
        )
        .unwrap_err();

        match err {
            EntryError::InvalidTimingField { field, raw } => {
                assert_eq!(field, "streams[1].start_time");
                assert_eq!(raw, "N/A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_and_non_finite_values() {
        let mut missing = raw("0", &[("video", None, "0")]);
        missing.streams[0].start_time = None;
        assert!(matches!(
            normalize(&missing, "fallback"),
            Err(EntryError::InvalidTimingField { ref raw, .. }) if raw.is_empty()
        ));

        assert!(normalize(&raw("NaN", &[]), "fallback").is_err());
        assert!(normalize(&raw("inf", &[]), "fallback").is_err());
    }

    #[test]
    fn falls_back_to_location_name() {
        let mut probe = raw("0", &[]);
        probe.format.filename = None;

        let record = normalize(&probe, "http://cdn.example/a.mov").unwrap();
        assert_eq!(record.file_name(), "http://cdn.example/a.mov");
    }

    #[test]
    fn missing_channels_is_zero() {
        let record = normalize(&raw("0", &[("audio", None, "0")]), "fallback").unwrap();
        assert_eq!(record.streams()[0].channel_count, 0);
    }
}
