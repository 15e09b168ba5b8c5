//! Picking one anime out of a result page and deriving what the card shows

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

use crate::anilist::MediaItem;

pub const NO_DESCRIPTION: &str = "No description available.";

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Source of uniform indices in `[0, len)`. `len` is never zero.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Unseeded thread-local RNG
#[derive(Debug, Default)]
pub struct RandomIndex;

impl IndexSource for RandomIndex {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted. Each value is
/// reduced modulo `len` so it always lands in range.
#[derive(Debug, Clone)]
pub struct SequenceIndex {
    indices: Vec<usize>,
    pos: usize,
}

impl SequenceIndex {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, pos: 0 }
    }
}

impl IndexSource for SequenceIndex {
    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let idx = self.indices[self.pos % self.indices.len()];
        self.pos += 1;
        idx % len
    }
}

pub fn select<'a>(items: &'a [MediaItem], source: &mut dyn IndexSource) -> Option<&'a MediaItem> {
    if items.is_empty() {
        return None;
    }
    items.get(source.next_index(items.len()))
}

/// Display-ready view of a [`MediaItem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub title: String,
    pub genres: String,
    pub description: String,
}

impl From<&MediaItem> for Presentation {
    fn from(item: &MediaItem) -> Self {
        Self {
            title: display_title(item),
            genres: item.genres.join(", "),
            description: clean_description(item.description.as_deref()),
        }
    }
}

/// English title when present, romaji otherwise
pub fn display_title(item: &MediaItem) -> String {
    [&item.title.english, &item.title.romaji]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn clean_description(description: Option<&str>) -> String {
    let stripped = description
        .map(|d| tag_pattern().replace_all(d, "").into_owned())
        .unwrap_or_default();

    if stripped.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anilist::MediaTitle;

    fn item(id: i64, english: Option<&str>, romaji: Option<&str>) -> MediaItem {
        MediaItem {
            id,
            title: MediaTitle {
                romaji: romaji.map(String::from),
                english: english.map(String::from),
            },
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            description: None,
        }
    }

    #[test]
    fn test_display_title_prefers_english() {
        let bebop = item(1, Some("Cowboy Bebop"), Some("Kaubōi Bibappu"));
        assert_eq!(display_title(&bebop), "Cowboy Bebop");

        let bebop = item(1, None, Some("Kaubōi Bibappu"));
        assert_eq!(display_title(&bebop), "Kaubōi Bibappu");
    }

    #[test]
    fn test_display_title_skips_empty_english() {
        let show = item(2, Some(""), Some("Mushishi"));
        assert_eq!(display_title(&show), "Mushishi");
        assert_eq!(display_title(&item(3, None, None)), "Unknown");
    }

    #[test]
    fn test_description_strips_tags() {
        assert_eq!(clean_description(Some("A <b>great</b> show.")), "A great show.");
        assert_eq!(
            clean_description(Some("Line one.<br><br>\nLine <i>two</i>.")),
            "Line one.\nLine two."
        );
    }

    #[test]
    fn test_description_placeholder() {
        assert_eq!(clean_description(None), NO_DESCRIPTION);
        assert_eq!(clean_description(Some("")), NO_DESCRIPTION);
        assert_eq!(clean_description(Some("<br><br>")), NO_DESCRIPTION);
    }

    #[test]
    fn test_presentation_joins_genres() {
        let mut bebop = item(1, Some("Cowboy Bebop"), None);
        bebop.description = Some("Bounty <i>hunters</i>.".to_string());

        let card = Presentation::from(&bebop);
        assert_eq!(card.title, "Cowboy Bebop");
        assert_eq!(card.genres, "Action, Sci-Fi");
        assert_eq!(card.description, "Bounty hunters.");
    }

    #[test]
    fn test_select_uses_index_source() {
        let items: Vec<_> = (0..3).map(|i| item(i, None, Some("x"))).collect();
        let mut source = SequenceIndex::new(vec![2, 0, 4]);

        assert_eq!(select(&items, &mut source).map(|m| m.id), Some(2));
        assert_eq!(select(&items, &mut source).map(|m| m.id), Some(0));
        // 4 % 3
        assert_eq!(select(&items, &mut source).map(|m| m.id), Some(1));
        // cycles back to the start
        assert_eq!(select(&items, &mut source).map(|m| m.id), Some(2));
    }

    #[test]
    fn test_select_empty_is_none() {
        let mut source = RandomIndex;
        assert!(select(&[], &mut source).is_none());
    }

    #[test]
    fn test_random_index_is_roughly_uniform() {
        const LEN: usize = 5;
        const TRIALS: usize = 50_000;

        let mut source = RandomIndex;
        let mut counts = [0usize; LEN];
        for _ in 0..TRIALS {
            let idx = source.next_index(LEN);
            assert!(idx < LEN);
            counts[idx] += 1;
        }

        // Expected 10_000 each; sd is ~90, so 600 is far outside normal variation
        let expected = TRIALS / LEN;
        for count in counts {
            assert!(count.abs_diff(expected) < 600, "skewed counts: {:?}", counts);
        }
    }
}
