use super::error::DraftError;
use super::kind::{Field, Kind};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicDraft {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub audio_url: String,
    pub cover_url: String,
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostDraft {
    pub title: String,
    pub content: String,
    pub cover_url: String,
    pub author: String,
}

/// Unsaved form state for one create operation. Each variant only holds the
/// fields its kind sends, so nothing from another kind can leak into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Video(VideoDraft),
    Music(MusicDraft),
    BlogPost(BlogPostDraft),
}

enum Slot<'a> {
    Text(&'a mut String),
    Number(&'a mut Option<u64>),
}

enum Entry<'a> {
    Text(&'a str),
    Number(Option<u64>),
}

impl Draft {
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Video => Draft::Video(VideoDraft::default()),
            Kind::Music => Draft::Music(MusicDraft::default()),
            Kind::BlogPost => Draft::BlogPost(BlogPostDraft::default()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Draft::Video(_) => Kind::Video,
            Draft::Music(_) => Kind::Music,
            Draft::BlogPost(_) => Kind::BlogPost,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Draft::empty(self.kind())
    }

    fn slot(&mut self, field: Field) -> Option<Slot<'_>> {
        let slot = match (self, field) {
            (Draft::Video(d), Field::Title) => Slot::Text(&mut d.title),
            (Draft::Video(d), Field::Description) => Slot::Text(&mut d.description),
            (Draft::Video(d), Field::VideoUrl) => Slot::Text(&mut d.video_url),
            (Draft::Video(d), Field::ThumbnailUrl) => Slot::Text(&mut d.thumbnail_url),
            (Draft::Video(d), Field::Duration) => Slot::Number(&mut d.duration),
            (Draft::Music(d), Field::Title) => Slot::Text(&mut d.title),
            (Draft::Music(d), Field::Artist) => Slot::Text(&mut d.artist),
            (Draft::Music(d), Field::Album) => Slot::Text(&mut d.album),
            (Draft::Music(d), Field::AudioUrl) => Slot::Text(&mut d.audio_url),
            (Draft::Music(d), Field::CoverUrl) => Slot::Text(&mut d.cover_url),
            (Draft::Music(d), Field::Duration) => Slot::Number(&mut d.duration),
            (Draft::BlogPost(d), Field::Title) => Slot::Text(&mut d.title),
            (Draft::BlogPost(d), Field::Content) => Slot::Text(&mut d.content),
            (Draft::BlogPost(d), Field::CoverUrl) => Slot::Text(&mut d.cover_url),
            (Draft::BlogPost(d), Field::Author) => Slot::Text(&mut d.author),
            _ => return None,
        };
        Some(slot)
    }

    fn entry(&self, field: Field) -> Option<Entry<'_>> {
        let entry = match (self, field) {
            (Draft::Video(d), Field::Title) => Entry::Text(&d.title),
            (Draft::Video(d), Field::Description) => Entry::Text(&d.description),
            (Draft::Video(d), Field::VideoUrl) => Entry::Text(&d.video_url),
            (Draft::Video(d), Field::ThumbnailUrl) => Entry::Text(&d.thumbnail_url),
            (Draft::Video(d), Field::Duration) => Entry::Number(d.duration),
            (Draft::Music(d), Field::Title) => Entry::Text(&d.title),
            (Draft::Music(d), Field::Artist) => Entry::Text(&d.artist),
            (Draft::Music(d), Field::Album) => Entry::Text(&d.album),
            (Draft::Music(d), Field::AudioUrl) => Entry::Text(&d.audio_url),
            (Draft::Music(d), Field::CoverUrl) => Entry::Text(&d.cover_url),
            (Draft::Music(d), Field::Duration) => Entry::Number(d.duration),
            (Draft::BlogPost(d), Field::Title) => Entry::Text(&d.title),
            (Draft::BlogPost(d), Field::Content) => Entry::Text(&d.content),
            (Draft::BlogPost(d), Field::CoverUrl) => Entry::Text(&d.cover_url),
            (Draft::BlogPost(d), Field::Author) => Entry::Text(&d.author),
            _ => return None,
        };
        Some(entry)
    }

    /// Sets one field from raw form input.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        let kind = self.kind();
        match self.slot(field) {
            Some(Slot::Text(text)) => {
                *text = value.to_string();
                Ok(())
            }
            Some(Slot::Number(number)) => {
                let trimmed = value.trim();
                *number = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse().map_err(|_| DraftError::InvalidNumber {
                        field,
                        value: value.to_string(),
                    })?)
                };
                Ok(())
            }
            None => Err(DraftError::NotApplicable { field, kind }),
        }
    }

    /// Current value of a field as it would be sent, `None` when unset or not
    /// part of this kind.
    pub fn value(&self, field: Field) -> Option<Value> {
        match self.entry(field)? {
            Entry::Text(text) if text.trim().is_empty() => None,
            Entry::Text(text) => Some(Value::from(text)),
            Entry::Number(number) => number.map(Value::from),
        }
    }

    /// Checks that the kind's required fields are present.
    pub fn validate(&self) -> Result<(), DraftError> {
        match self
            .kind()
            .spec()
            .required
            .iter()
            .find(|field| self.value(**field).is_none())
        {
            Some(field) => Err(DraftError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// Request body for the create call: the `type` discriminator plus the
    /// set fields of this kind, nothing else.
    pub fn to_payload(&self) -> Map<String, Value> {
        let spec = self.kind().spec();
        let mut payload = Map::new();
        payload.insert("type".to_string(), Value::from(spec.write_name));
        for field in spec.fields {
            if let Some(value) = self.value(*field) {
                payload.insert(field.wire_name().to_string(), value);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video(title: &str, url: &str) -> Draft {
        let mut draft = Draft::empty(Kind::Video);
        draft.set(Field::Title, title).unwrap();
        draft.set(Field::VideoUrl, url).unwrap();
        draft
    }

    #[test]
    fn test_video_payload_has_only_video_fields() {
        let payload = video("T", "u").to_payload();
        assert_eq!(
            Value::Object(payload),
            json!({"type": "video", "title": "T", "video_url": "u"})
        );
    }

    #[test]
    fn test_foreign_field_cannot_be_set() {
        let mut draft = video("T", "u");
        let err = draft.set(Field::Artist, "leftover").unwrap_err();
        assert_eq!(
            err,
            DraftError::NotApplicable {
                field: Field::Artist,
                kind: Kind::Video
            }
        );
        assert!(!draft.to_payload().contains_key("artist"));
    }

    #[test]
    fn test_music_payload() {
        let mut draft = Draft::empty(Kind::Music);
        draft.set(Field::Title, "Song").unwrap();
        draft.set(Field::AudioUrl, "https://a/x.mp3").unwrap();
        draft.set(Field::Artist, "Band").unwrap();
        draft.set(Field::Duration, " 180 ").unwrap();

        assert_eq!(
            Value::Object(draft.to_payload()),
            json!({
                "type": "music",
                "title": "Song",
                "artist": "Band",
                "audio_url": "https://a/x.mp3",
                "duration": 180
            })
        );
    }

    #[test]
    fn test_blog_payload_uses_singular_name() {
        let mut draft = Draft::empty(Kind::BlogPost);
        draft.set(Field::Title, "Post").unwrap();
        draft.set(Field::Content, "Body").unwrap();
        let payload = draft.to_payload();
        assert_eq!(payload["type"], json!("blog"));
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_duration_must_be_numeric() {
        let mut draft = Draft::empty(Kind::Video);
        assert!(matches!(
            draft.set(Field::Duration, "two minutes"),
            Err(DraftError::InvalidNumber { .. })
        ));
        assert!(matches!(
            draft.set(Field::Duration, "-5"),
            Err(DraftError::InvalidNumber { .. })
        ));

        draft.set(Field::Duration, "90").unwrap();
        assert_eq!(draft.value(Field::Duration), Some(json!(90)));
        draft.set(Field::Duration, "").unwrap();
        assert_eq!(draft.value(Field::Duration), None);
    }

    #[test]
    fn test_validate_required_fields() {
        assert_eq!(
            Draft::empty(Kind::Video).validate(),
            Err(DraftError::MissingField(Field::Title))
        );

        let mut blog = Draft::empty(Kind::BlogPost);
        blog.set(Field::Title, "Post").unwrap();
        blog.set(Field::Content, "   ").unwrap();
        assert_eq!(
            blog.validate(),
            Err(DraftError::MissingField(Field::Content))
        );

        assert_eq!(video("T", "u").validate(), Ok(()));
    }

    #[test]
    fn test_settable_fields_match_kind_table() {
        for kind in Kind::ALL {
            for field in Field::ALL {
                let mut draft = Draft::empty(kind);
                let value = if field == Field::Duration { "1" } else { "x" };
                assert_eq!(
                    draft.set(field, value).is_ok(),
                    kind.accepts(field),
                    "{kind} / {field}"
                );
            }
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(Draft::empty(Kind::Music).is_empty());
        assert!(!video("T", "").is_empty());
    }
}
