//! Genre input normalization
//!
//! Turns the free-text field ("Horror, Romance") into the ordered list of
//! genre names sent as the `genre_in` filter.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Drop empty pieces such as the one after a trailing comma
    pub drop_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreQuery {
    genres: Vec<String>,
}

impl GenreQuery {
    /// Split on commas and trim each piece, keeping empty pieces.
    ///
    /// `"Horror,"` yields `["Horror", ""]`. Blank input yields an empty query.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, NormalizeOptions::default())
    }

    pub fn parse_with(raw: &str, options: NormalizeOptions) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        let genres = raw
            .split(',')
            .map(str::trim)
            .filter(|g| !options.drop_empty || !g.is_empty())
            .map(String::from)
            .collect();

        Self { genres }
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// The `genres` variable: `None` means no filter (sent as null)
    pub fn as_filter(&self) -> Option<&[String]> {
        if self.genres.is_empty() {
            None
        } else {
            Some(&self.genres)
        }
    }
}
