//! Wire types for the Zoom cloud recording API.
//!
//! Meetings and recording files keep every field they do not model in
//! `extra`, so an exported document round-trips without losing provider data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared type of a recording file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingType {
    SharedScreenWithSpeakerView,
    AudioTranscript,
    AudioOnly,
    ChatFile,
    ClosedCaption,
    Unknown,
}

impl RecordingType {
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "shared_screen_with_speaker_view" => Self::SharedScreenWithSpeakerView,
            "audio_transcript" => Self::AudioTranscript,
            "audio_only" => Self::AudioOnly,
            "chat_file" => Self::ChatFile,
            "closed_caption" => Self::ClosedCaption,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SharedScreenWithSpeakerView => "shared_screen_with_speaker_view",
            Self::AudioTranscript => "audio_transcript",
            Self::AudioOnly => "audio_only",
            Self::ChatFile => "chat_file",
            Self::ClosedCaption => "closed_caption",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordingFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_type: Option<String>,
    /// ISO-8601 start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordingFile {
    /// Missing or unrecognised types are `Unknown`.
    pub fn kind(&self) -> RecordingType {
        self.recording_type
            .as_deref()
            .map(RecordingType::from_api)
            .unwrap_or(RecordingType::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_play_passcode: Option<String>,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meeting {
    /// UUID if present and non-empty.
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref().filter(|uuid| !uuid.is_empty())
    }
}

/// One page of `GET /accounts/me/recordings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordingsPage {
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub total_records: Option<u64>,
}

impl RecordingsPage {
    /// Continuation token, `None` when this is the last page.
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Response of the OAuth token exchange.
#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Subset of `GET /users/me` shown by the connectivity check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, rename = "type")]
    pub account_type: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserInfo {
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_type_from_api() {
        assert_eq!(RecordingType::from_api("audio_only"), RecordingType::AudioOnly);
        assert_eq!(
            RecordingType::from_api("shared_screen_with_speaker_view"),
            RecordingType::SharedScreenWithSpeakerView
        );
        assert_eq!(RecordingType::from_api("timeline"), RecordingType::Unknown);
        assert_eq!(RecordingType::from_api(""), RecordingType::Unknown);
    }

    #[test]
    fn test_recording_type_as_str_matches_api_name() {
        for kind in [
            RecordingType::SharedScreenWithSpeakerView,
            RecordingType::AudioTranscript,
            RecordingType::AudioOnly,
            RecordingType::ChatFile,
            RecordingType::ClosedCaption,
        ] {
            assert_eq!(RecordingType::from_api(kind.as_str()), kind);
        }
        assert_eq!(RecordingType::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_recording_file_kind_missing_type() {
        let file = RecordingFile::default();
        assert_eq!(file.kind(), RecordingType::Unknown);
    }

    #[test]
    fn test_meeting_keeps_unmodelled_fields() {
        let raw = json!({
            "uuid": "abc==",
            "id": 81234567890u64,
            "topic": "Weekly sync",
            "start_time": "2025-10-06T12:00:00Z",
            "duration": 42,
            "recording_files": [{
                "id": "f1",
                "recording_type": "timeline",
                "file_size": 1024
            }]
        });

        let meeting: Meeting = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(meeting.id, Some(81234567890));
        assert_eq!(meeting.extra["duration"], json!(42));
        assert_eq!(meeting.recording_files[0].extra["file_size"], json!(1024));
        assert_eq!(serde_json::to_value(&meeting).unwrap(), raw);
    }

    #[test]
    fn test_meeting_uuid_ignores_empty() {
        let meeting = Meeting {
            uuid: Some(String::new()),
            ..Default::default()
        };
        assert!(meeting.uuid().is_none());
    }

    #[test]
    fn test_page_next_token() {
        let page: RecordingsPage =
            serde_json::from_value(json!({"meetings": [], "next_page_token": ""})).unwrap();
        assert!(page.next_token().is_none());

        let page: RecordingsPage = serde_json::from_value(json!({"next_page_token": "p2"})).unwrap();
        assert_eq!(page.next_token(), Some("p2"));
        assert!(page.meetings.is_empty());
    }

    #[test]
    fn test_user_display_name() {
        let user = UserInfo {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(UserInfo::default().display_name(), "");
    }
}
