use super::error::DraftError;
use std::fmt;
use std::str::FromStr;

/// Content kinds served by the media endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Video,
    Music,
    BlogPost,
}

/// Form and wire fields across all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    VideoUrl,
    ThumbnailUrl,
    Duration,
    Artist,
    Album,
    AudioUrl,
    CoverUrl,
    Content,
    Author,
}

/// Which play counter a card shows, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Plays,
}

/// Per-kind capabilities. Adding a kind means adding one entry to `KINDS`.
#[derive(Debug)]
pub struct KindSpec {
    pub kind: Kind,
    /// Name used by `GET ?type=`
    pub list_name: &'static str,
    /// Name used by the `POST` body and `DELETE ?type=`
    pub write_name: &'static str,
    pub label: &'static str,
    pub fields: &'static [Field],
    pub required: &'static [Field],
    pub counter: Option<Counter>,
    pub badge: Option<&'static str>,
}

static KINDS: [KindSpec; 3] = [
    KindSpec {
        kind: Kind::Video,
        list_name: "videos",
        write_name: "video",
        label: "video",
        fields: &[
            Field::Title,
            Field::Description,
            Field::VideoUrl,
            Field::ThumbnailUrl,
            Field::Duration,
        ],
        required: &[Field::Title, Field::VideoUrl],
        counter: Some(Counter::Views),
        badge: Some("▶"),
    },
    KindSpec {
        kind: Kind::Music,
        list_name: "music",
        write_name: "music",
        label: "track",
        fields: &[
            Field::Title,
            Field::Artist,
            Field::Album,
            Field::AudioUrl,
            Field::CoverUrl,
            Field::Duration,
        ],
        required: &[Field::Title, Field::AudioUrl],
        counter: Some(Counter::Plays),
        badge: Some("♪"),
    },
    KindSpec {
        kind: Kind::BlogPost,
        list_name: "blog",
        write_name: "blog",
        label: "post",
        fields: &[Field::Title, Field::Content, Field::CoverUrl, Field::Author],
        required: &[Field::Title, Field::Content],
        counter: None,
        badge: None,
    },
];

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Video, Kind::Music, Kind::BlogPost];

    pub fn spec(self) -> &'static KindSpec {
        // KINDS is ordered like the enum
        &KINDS[self as usize]
    }

    pub fn list_name(self) -> &'static str {
        self.spec().list_name
    }

    pub fn write_name(self) -> &'static str {
        self.spec().write_name
    }

    pub fn accepts(self, field: Field) -> bool {
        self.spec().fields.contains(&field)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.write_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown content kind '{0}' (expected video, music or blog)")]
pub struct UnknownKind(String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if matches!(wanted.as_str(), "blogpost" | "post" | "posts") {
            return Ok(Kind::BlogPost);
        }
        KINDS
            .iter()
            .find(|spec| spec.list_name == wanted || spec.write_name == wanted)
            .map(|spec| spec.kind)
            .ok_or(UnknownKind(wanted))
    }
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Title,
        Field::Description,
        Field::VideoUrl,
        Field::ThumbnailUrl,
        Field::Duration,
        Field::Artist,
        Field::Album,
        Field::AudioUrl,
        Field::CoverUrl,
        Field::Content,
        Field::Author,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::VideoUrl => "video_url",
            Field::ThumbnailUrl => "thumbnail_url",
            Field::Duration => "duration",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::AudioUrl => "audio_url",
            Field::CoverUrl => "cover_url",
            Field::Content => "content",
            Field::Author => "author",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Field {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Field::ALL
            .into_iter()
            .find(|field| field.wire_name() == wanted)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}
