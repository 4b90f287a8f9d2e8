use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ProgrammeId, SpeakerId};

/// A scheduled festival session. The server owns the id and the stored copy;
/// clients hold it only through the collection cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programme {
    #[serde(rename = "_id")]
    pub id: ProgrammeId,
    pub name: String,
    pub day_number: u32,
    pub date: NaiveDate,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub venue: String,
}

/// Mutable field set of a programme; the JSON body for create and full-replace
/// update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeWrite {
    pub name: String,
    pub day_number: u32,
    pub date: NaiveDate,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    pub bio: String,
    pub programmes: Vec<ProgrammeId>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Display ordering only; lower values sort first, duplicates allowed.
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerWrite {
    pub name: String,
    pub bio: String,
    pub programmes: Vec<ProgrammeId>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub priority: i32,
}

/// Response body of `POST /upload-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programme_round_trips_with_wire_field_names() {
        let raw = r#"{
            "_id": "p1",
            "name": "Keynote",
            "day_number": 1,
            "date": "2025-03-10",
            "start_datetime": "2025-03-10T09:00:00Z",
            "end_datetime": "2025-03-10T10:30:00Z",
            "venue": "Main Hall"
        }"#;
        let programme: Programme = serde_json::from_str(raw).expect("decode");
        assert_eq!(programme.id, ProgrammeId::new("p1"));
        assert_eq!(programme.date, NaiveDate::from_ymd_opt(2025, 3, 10).expect("date"));

        let encoded = serde_json::to_value(&programme).expect("encode");
        assert_eq!(encoded["_id"], "p1");
        assert_eq!(encoded["date"], "2025-03-10");
    }

    #[test]
    fn speaker_image_url_uses_camel_case_and_is_optional() {
        let raw = r#"{"id": "s1", "name": "Ada", "bio": "writer", "programmes": ["p1"]}"#;
        let speaker: Speaker = serde_json::from_str(raw).expect("decode");
        assert_eq!(speaker.image_url, None);
        assert_eq!(speaker.priority, 0);

        let write = SpeakerWrite {
            name: speaker.name,
            bio: speaker.bio,
            programmes: speaker.programmes,
            image_url: Some("https://img.example/ada.png".into()),
            priority: 2,
        };
        let encoded = serde_json::to_value(&write).expect("encode");
        assert_eq!(encoded["imageUrl"], "https://img.example/ada.png");
        assert!(encoded.get("image_url").is_none());
    }
}
