use serde::Serialize;

use crate::{models::Video, session::SessionEvent};

/// Maximum number of tags shown on a card
pub const MAX_CARD_TAGS: usize = 3;

/// Thumbnail slot of a card
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum Thumbnail {
    Image(String),
    /// Drawn as a play glyph, never as a broken image
    Placeholder,
}

/// Rendered summary of one video
///
/// Built from borrowed inputs and never writes back to them. `activate` is the
/// card's only interaction: it takes nothing because the card already knows
/// which video it shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoCard {
    #[serde(skip)]
    video: Video,
    pub id: i64,
    pub title: String,
    pub thumbnail: Thumbnail,
    pub views_label: String,
    pub likes_label: String,
    pub category: Option<String>,
    /// `round(score * 100)`, present only when a score was supplied
    pub match_percent: Option<i64>,
    pub reason: Option<String>,
    /// Empty means the tag row is omitted
    pub tags: Vec<String>,
    pub uploaded_on: Option<String>,
}

impl VideoCard {
    pub fn new(video: &Video, similarity_score: Option<f64>, reason: Option<&str>) -> Self {
        let thumbnail = match video.thumbnail_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Thumbnail::Image(url.to_string()),
            _ => Thumbnail::Placeholder,
        };

        Self {
            video: video.clone(),
            id: video.id,
            title: video.title.clone(),
            thumbnail,
            views_label: format!("{} views", group_thousands(video.views)),
            likes_label: format!("{} likes", video.likes),
            category: video.category.clone(),
            match_percent: similarity_score.map(match_percent),
            reason: reason.filter(|r| !r.is_empty()).map(str::to_string),
            tags: video
                .tag_list()
                .iter()
                .take(MAX_CARD_TAGS)
                .cloned()
                .collect(),
            uploaded_on: video.uploaded_on().map(|d| d.format("%b %-d, %Y").to_string()),
        }
    }

    /// The video this card was built from
    pub fn video(&self) -> &Video {
        &self.video
    }

    /// Event raised when the card is clicked
    pub fn activate(&self) -> SessionEvent {
        SessionEvent::VideoSelected(self.video.clone())
    }
}

/// Displayed match percentage for a similarity score
///
/// Rounds half up. A product within a few ULPs of a half counts as the half,
/// since 0.995 * 100 is 99.49999999999999 in f64 and must still show 100.
pub fn match_percent(score: f64) -> i64 {
    let scaled = score * 100.0;
    let tolerance = 4.0 * f64::EPSILON * scaled.abs().max(1.0);
    if (scaled - scaled.floor() - 0.5).abs() <= tolerance {
        scaled.floor() as i64 + 1
    } else {
        scaled.round() as i64
    }
}

/// Formats `1234567` as `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
