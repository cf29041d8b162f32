use super::gallery::GalleryView;
use crate::media::{Counter, Kind, MediaDetails, MediaItem};
use crate::utils::{format_duration, format_number, truncate};

const EXCERPT_CHARS: usize = 120;

pub fn render_gallery(kind: Kind, view: &GalleryView) -> String {
    match view {
        GalleryView::Loading => "⏳ Loading...".to_string(),
        GalleryView::Empty => format!("No {}s yet", kind.spec().label),
        GalleryView::Items(items) => items
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

pub fn render_card(item: &MediaItem) -> String {
    let spec = item.kind().spec();
    let mut heading = format!("#{} {}", item.id, item.title);
    if let Some(badge) = spec.badge {
        heading = format!("{badge} {heading}");
    }

    let mut lines = vec![heading];
    let mut stats = Vec::new();

    match &item.details {
        MediaDetails::Video(video) => {
            push_text(&mut lines, video.description.as_deref());
            if let Some(duration) = video.duration_seconds {
                stats.push(format_duration(duration));
            }
        }
        MediaDetails::Music(music) => {
            let artist = music.artist.as_deref().filter(|a| !a.is_empty());
            let byline = match (artist, music.album.as_deref()) {
                (Some(artist), Some(album)) if !album.is_empty() => {
                    Some(format!("{artist} · {album}"))
                }
                (Some(artist), _) => Some(artist.to_string()),
                (None, album) => album.map(str::to_string),
            };
            push_text(&mut lines, byline.as_deref());
            if let Some(duration) = music.duration_seconds {
                stats.push(format_duration(duration));
            }
        }
        MediaDetails::BlogPost(post) => {
            if let Some(author) = post.author.as_deref().filter(|a| !a.is_empty()) {
                lines.push(format!("   by {author}"));
            }
            let excerpt = post.content.as_deref().map(|c| truncate(c, EXCERPT_CHARS));
            push_text(&mut lines, excerpt.as_deref());
        }
    }

    match spec.counter {
        Some(Counter::Views) => stats.push(format!("{} views", format_number(counter(item)))),
        Some(Counter::Plays) => stats.push(format!("{} plays", format_number(counter(item)))),
        None => {}
    }
    if let Some(created_at) = item.created_at {
        stats.push(created_at.format("%Y-%m-%d").to_string());
    }
    if !stats.is_empty() {
        lines.push(format!("   {}", stats.join(" · ")));
    }
    if let Some(artwork) = item.artwork() {
        lines.push(format!("   {artwork}"));
    }

    lines.join("\n")
}

fn counter(item: &MediaItem) -> u64 {
    match &item.details {
        MediaDetails::Video(video) => video.view_count.unwrap_or(0),
        MediaDetails::Music(music) => music.play_count.unwrap_or(0),
        MediaDetails::BlogPost(_) => 0,
    }
}

fn push_text(lines: &mut Vec<String>, text: Option<&str>) {
    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        lines.push(format!("   {text}"));
    }
}
