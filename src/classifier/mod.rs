//! Decides which recording files a workflow acts on.

use crate::zoom::{Meeting, RecordingFile, RecordingType};

/// Recording types the SQL generator emits rows for.
pub const SQL_RECORDING_TYPES: &[RecordingType] = &[
    RecordingType::SharedScreenWithSpeakerView,
    RecordingType::AudioTranscript,
    RecordingType::AudioOnly,
    RecordingType::ChatFile,
    RecordingType::ClosedCaption,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingFilter {
    /// Exactly one type.
    Only(RecordingType),
    /// Any type in the list.
    AnyOf(&'static [RecordingType]),
}

impl RecordingFilter {
    /// Files with a missing or unrecognised type never match.
    pub fn is_actionable(&self, file: &RecordingFile) -> bool {
        let kind = file.kind();
        if kind == RecordingType::Unknown {
            return false;
        }
        match self {
            Self::Only(target) => kind == *target,
            Self::AnyOf(types) => types.contains(&kind),
        }
    }

    /// Matching files in their original order.
    pub fn select<'a>(&self, files: &'a [RecordingFile]) -> Vec<&'a RecordingFile> {
        files.iter().filter(|file| self.is_actionable(file)).collect()
    }

    /// Matching files across meetings, paired with their parent meeting.
    pub fn select_from_meetings<'a>(
        &self,
        meetings: &'a [Meeting],
    ) -> Vec<(&'a Meeting, &'a RecordingFile)> {
        meetings
            .iter()
            .flat_map(|meeting| {
                self.select(&meeting.recording_files)
                    .into_iter()
                    .map(move |file| (meeting, file))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, recording_type: Option<&str>) -> RecordingFile {
        RecordingFile {
            id: Some(id.to_string()),
            recording_type: recording_type.map(str::to_string),
            ..Default::default()
        }
    }

    fn mixed() -> Vec<RecordingFile> {
        vec![
            file("1", Some("shared_screen_with_speaker_view")),
            file("2", Some("audio_only")),
            file("3", Some("timeline")),
            file("4", None),
            file("5", Some("chat_file")),
            file("6", Some("audio_only")),
            file("7", Some("closed_caption")),
            file("8", Some("audio_transcript")),
        ]
    }

    fn ids(files: &[&RecordingFile]) -> Vec<String> {
        files.iter().filter_map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_only_selects_single_type_in_order() {
        let files = mixed();
        let selected = RecordingFilter::Only(RecordingType::AudioOnly).select(&files);
        assert_eq!(ids(&selected), vec!["2", "6"]);
    }

    #[test]
    fn test_any_of_selects_whitelist_in_order() {
        let files = mixed();
        let selected = RecordingFilter::AnyOf(SQL_RECORDING_TYPES).select(&files);
        assert_eq!(ids(&selected), vec!["1", "2", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_unknown_never_matches() {
        let filter = RecordingFilter::Only(RecordingType::Unknown);
        assert!(!filter.is_actionable(&file("3", Some("timeline"))));
        assert!(!filter.is_actionable(&file("4", None)));
    }

    #[test]
    fn test_empty_whitelist_matches_nothing() {
        let files = mixed();
        assert!(RecordingFilter::AnyOf(&[]).select(&files).is_empty());
    }

    #[test]
    fn test_select_from_meetings_keeps_parent() {
        let meetings = vec![
            Meeting {
                id: Some(1),
                recording_files: vec![file("a", Some("audio_only")), file("b", Some("chat_file"))],
                ..Default::default()
            },
            Meeting {
                id: Some(2),
                recording_files: vec![file("c", Some("audio_only"))],
                ..Default::default()
            },
        ];

        let selected =
            RecordingFilter::Only(RecordingType::AudioOnly).select_from_meetings(&meetings);
        let pairs: Vec<(u64, &str)> = selected
            .iter()
            .map(|(m, f)| (m.id.unwrap(), f.id.as_deref().unwrap()))
            .collect();
        assert_eq!(pairs, vec![(1, "a"), (2, "c")]);
    }
}
