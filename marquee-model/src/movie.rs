use std::fmt;

/// TMDB movie identifier. Unique within a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MovieId(pub u64);

impl MovieId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A catalog entry as returned by the listing endpoints.
///
/// Titles default to the empty string when the upstream omits them; an empty
/// title never matches a letter filter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: MovieId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub release_date: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            vote_average: 0.0,
            release_date: None,
        }
    }

    /// Rating rendered with one decimal, or `N/A` for unrated entries.
    pub fn formatted_rating(&self) -> String {
        format_rating(self.vote_average)
    }

    /// Release date, treating the empty string TMDB sometimes sends as absent.
    pub fn release_date(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref())
    }

    #[cfg(feature = "chrono")]
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        parse_release_date(self.release_date.as_deref()).map(|d| d.year())
    }
}

pub(crate) fn format_rating(rating: f32) -> String {
    if rating > 0.0 {
        format!("{rating:.1}")
    } else {
        "N/A".to_string()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(feature = "chrono")]
pub(crate) fn parse_release_date(
    value: Option<&str>,
) -> Option<chrono::NaiveDate> {
    non_empty(value)
        .and_then(|v| chrono::NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListingPage {
    pub page: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<Movie>,
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_results: u32,
}

impl ListingPage {
    /// True once the upstream reports this page as the final one.
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}
