//! Skew classifier.
//!
//! Rules are tried in order and the first match wins. Add a new remediable
//! pattern by adding a variant to [`SkewClassification`] and a function to
//! [`RULES`].

use crate::models::{ProbeRecord, StreamInfo, StreamKind};

use super::{SilentGap, SkewClassification};

/// A remediation rule: returns a classification when the record matches.
type Rule = fn(&ProbeRecord) -> Option<SkewClassification>;

const RULES: &[Rule] = &[silent_audio_gap];

/// Classify a probe record. Never fails.
pub fn classify(record: &ProbeRecord) -> SkewClassification {
    if !record.has_non_zero_timing() {
        return SkewClassification::Aligned;
    }

    RULES
        .iter()
        .find_map(|rule| rule(record))
        .unwrap_or(SkewClassification::Unhandled)
}

/// Two streams, video first at zero, stereo audio second starting late.
///
/// Audio-first files are intentionally not matched.
fn silent_audio_gap(record: &ProbeRecord) -> Option<SkewClassification> {
    let [video, audio] = record.streams() else {
        return None;
    };

    let matches = record.container_start_time() == 0.0
        && is_video_at_zero(video)
        && is_late_stereo_audio(audio);

    matches.then(|| {
        SkewClassification::VideoLeadsAudioBySilentGap(SilentGap {
            delay_seconds: audio.start_time,
            audio_channels: audio.channel_count,
        })
    })
}

fn is_video_at_zero(stream: &StreamInfo) -> bool {
    stream.kind == StreamKind::Video && stream.start_time == 0.0
}

fn is_late_stereo_audio(stream: &StreamInfo) -> bool {
    stream.kind == StreamKind::Audio && stream.channel_count == 2 && stream.start_time > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(container: f64, streams: Vec<StreamInfo>) -> ProbeRecord {
        ProbeRecord::new("clip.mov", container, streams)
    }

    fn is_gap(classification: SkewClassification) -> bool {
        matches!(
            classification,
            SkewClassification::VideoLeadsAudioBySilentGap(_)
        )
    }

    #[test]
    fn late_stereo_audio_is_remediable() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::video(0.0), StreamInfo::audio(2, 0.5)],
        ));
        assert_eq!(
            result,
            SkewClassification::VideoLeadsAudioBySilentGap(SilentGap {
                delay_seconds: 0.5,
                audio_channels: 2,
            })
        );
    }

    #[test]
    fn all_zero_is_aligned() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::video(0.0), StreamInfo::audio(2, 0.0)],
        ));
        assert_eq!(result, SkewClassification::Aligned);
    }

    #[test]
    fn zero_timing_is_aligned_regardless_of_layout() {
        let layouts = vec![
            vec![],
            vec![StreamInfo::audio(6, 0.0)],
            vec![StreamInfo::audio(2, 0.0), StreamInfo::video(0.0)],
            vec![
                StreamInfo::video(0.0),
                StreamInfo::audio(2, -0.2),
                StreamInfo::new(StreamKind::Other, 0, 0.0),
            ],
        ];

        for streams in layouts {
            assert_eq!(classify(&record(0.0, streams)), SkewClassification::Aligned);
        }
        assert_eq!(classify(&record(-1.0, vec![])), SkewClassification::Aligned);
    }

    #[test]
    fn surround_audio_is_unhandled() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::video(0.0), StreamInfo::audio(6, 0.5)],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn mono_audio_is_unhandled() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::video(0.0), StreamInfo::audio(1, 0.5)],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn audio_first_is_unhandled() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::audio(2, 0.5), StreamInfo::video(0.0)],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn wrong_stream_count_is_unhandled() {
        let one = record(0.0, vec![StreamInfo::audio(2, 0.5)]);
        let three = record(
            0.0,
            vec![
                StreamInfo::video(0.0),
                StreamInfo::audio(2, 0.5),
                StreamInfo::new(StreamKind::Other, 0, 0.0),
            ],
        );
        assert_eq!(classify(&one), SkewClassification::Unhandled);
        assert_eq!(classify(&three), SkewClassification::Unhandled);
    }

    #[test]
    fn container_start_offset_is_unhandled() {
        let result = classify(&record(
            0.5,
            vec![StreamInfo::video(0.0), StreamInfo::audio(2, 0.5)],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn late_video_is_unhandled() {
        let result = classify(&record(
            0.0,
            vec![StreamInfo::video(0.1), StreamInfo::audio(2, 0.5)],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn negative_audio_start_is_kept_and_unhandled() {
        let r = record(
            0.0,
            vec![StreamInfo::video(0.2), StreamInfo::audio(2, -0.3)],
        );
        assert_eq!(r.streams()[1].start_time, -0.3);
        assert_eq!(classify(&r), SkewClassification::Unhandled);
    }

    #[test]
    fn non_video_first_stream_is_unhandled() {
        let result = classify(&record(
            0.0,
            vec![
                StreamInfo::new(StreamKind::Other, 0, 0.0),
                StreamInfo::audio(2, 0.5),
            ],
        ));
        assert_eq!(result, SkewClassification::Unhandled);
    }

    #[test]
    fn only_the_exact_pattern_is_remediable() {
        let kinds = [StreamKind::Video, StreamKind::Audio, StreamKind::Other];
        let starts = [-0.5, 0.0, 0.5];
        let channels = [0, 1, 2, 6];

        for &container in &starts {
            for &k0 in &kinds {
                for &k1 in &kinds {
                    for &s0 in &starts {
                        for &s1 in &starts {
                            for &ch in &channels {
                                let r = record(
                                    container,
                                    vec![
                                        StreamInfo::new(k0, 0, s0),
                                        StreamInfo::new(k1, ch, s1),
                                    ],
                                );
                                let expected = container == 0.0
                                    && k0 == StreamKind::Video
                                    && k1 == StreamKind::Audio
                                    && ch == 2
                                    && s0 == 0.0
                                    && s1 > 0.0;
                                assert_eq!(is_gap(classify(&r)), expected, "{:?}", r);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let r = record(
            0.0,
            vec![StreamInfo::video(0.0), StreamInfo::audio(2, 0.023)],
        );
        assert_eq!(classify(&r), classify(&r));
    }
}
