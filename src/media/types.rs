use super::kind::Kind;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub details: MediaDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaDetails {
    Video(VideoDetails),
    Music(MusicDetails),
    BlogPost(BlogPostDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoDetails {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<u64>,
    #[serde(default, rename = "views")]
    pub view_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MusicDetails {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<u64>,
    #[serde(default, rename = "plays")]
    pub play_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlogPostDetails {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// Fields every record carries regardless of kind.
#[derive(Deserialize)]
struct RecordHeader {
    id: i64,
    title: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl MediaItem {
    /// Decodes one list record. The endpoint does not tag records with their
    /// kind, so the kind of the request decides the schema.
    pub fn from_record(kind: Kind, record: Value) -> Result<Self, serde_json::Error> {
        let header = RecordHeader::deserialize(&record)?;
        let details = match kind {
            Kind::Video => MediaDetails::Video(VideoDetails::deserialize(&record)?),
            Kind::Music => MediaDetails::Music(MusicDetails::deserialize(&record)?),
            Kind::BlogPost => MediaDetails::BlogPost(BlogPostDetails::deserialize(&record)?),
        };

        Ok(Self {
            id: header.id,
            title: header.title,
            created_at: header.created_at,
            details,
        })
    }

    pub fn kind(&self) -> Kind {
        match self.details {
            MediaDetails::Video(_) => Kind::Video,
            MediaDetails::Music(_) => Kind::Music,
            MediaDetails::BlogPost(_) => Kind::BlogPost,
        }
    }

    /// Image shown on the card: the video thumbnail or the cover art.
    pub fn artwork(&self) -> Option<&str> {
        match &self.details {
            MediaDetails::Video(v) => v.thumbnail_url.as_deref(),
            MediaDetails::Music(m) => m.cover_url.as_deref(),
            MediaDetails::BlogPost(b) => b.cover_url.as_deref(),
        }
        .filter(|url| !url.is_empty())
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS[.f][+HH:MM]` form the
/// endpoint produces. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|ts| ts.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_video_record() {
        let item = MediaItem::from_record(
            Kind::Video,
            json!({
                "id": 7,
                "title": "Launch",
                "description": "Keynote",
                "video_url": "https://cdn.example.com/v.mp4",
                "thumbnail_url": "https://cdn.example.com/t.jpg",
                "duration": 185,
                "views": 1200,
                "created_at": "2024-03-01 10:15:00.123456"
            }),
        )
        .unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.kind(), Kind::Video);
        assert_eq!(item.artwork(), Some("https://cdn.example.com/t.jpg"));
        let MediaDetails::Video(video) = &item.details else {
            panic!("expected video details");
        };
        assert_eq!(video.duration_seconds, Some(185));
        assert_eq!(video.view_count, Some(1200));
        assert_eq!(item.created_at.unwrap().year(), 2024);
    }

    #[test]
    fn test_foreign_fields_are_ignored() {
        let item = MediaItem::from_record(
            Kind::BlogPost,
            json!({"id": 1, "title": "Hello", "content": "Body", "artist": "nobody", "views": 3}),
        )
        .unwrap();

        assert_eq!(
            item.details,
            MediaDetails::BlogPost(BlogPostDetails {
                content: Some("Body".to_string()),
                author: None,
                cover_url: None,
            })
        );
    }

    #[test]
    fn test_nulls_decode_as_none() {
        let item = MediaItem::from_record(
            Kind::Music,
            json!({"id": 2, "title": "Song", "artist": null, "plays": null, "created_at": null}),
        )
        .unwrap();

        assert_eq!(item.details, MediaDetails::Music(MusicDetails::default()));
        assert!(item.created_at.is_none());
        assert!(item.artwork().is_none());
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        assert!(MediaItem::from_record(Kind::Video, json!({"title": "x"})).is_err());
        assert!(MediaItem::from_record(Kind::Video, json!({"id": "7", "title": "x"})).is_err());
        assert!(MediaItem::from_record(Kind::Video, json!({"id": 7})).is_err());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let rfc = parse_timestamp("2024-03-01T10:15:00Z").unwrap();
        assert_eq!(rfc.hour(), 10);

        let offset = parse_timestamp("2024-03-01 10:15:00.5+02:00").unwrap();
        assert_eq!(offset.hour(), 8);

        let naive = parse_timestamp("2024-03-01 10:15:00").unwrap();
        assert_eq!(naive.minute(), 15);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_unparseable_timestamp_is_dropped() {
        let item = MediaItem::from_record(
            Kind::Video,
            json!({"id": 3, "title": "x", "created_at": "not a date"}),
        )
        .unwrap();
        assert!(item.created_at.is_none());
    }
}
