use crate::movie::{MovieId, format_rating, non_empty};

const YOUTUBE_SITE: &str = "YouTube";
const TRAILER_TYPE: &str = "Trailer";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub character: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: u32,
}

/// Response of `/movie/{id}/credits`. Crew is not consumed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credits {
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    pub key: String,
    pub site: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site == YOUTUBE_SITE
    }

    pub fn is_trailer(&self) -> bool {
        self.kind == TRAILER_TYPE
    }

    /// Embeddable player URL; only meaningful for YouTube videos.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

/// Response of `/movie/{id}/videos`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoList {
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<Video>,
}

impl VideoList {
    /// First YouTube trailer, in upstream order.
    pub fn main_trailer(&self) -> Option<&Video> {
        self.results.iter().find(|v| v.is_youtube() && v.is_trailer())
    }

    /// YouTube videos that are not trailers (featurettes, clips, teasers).
    pub fn other_clips(&self) -> impl Iterator<Item = &Video> {
        self.results
            .iter()
            .filter(|v| v.is_youtube() && !v.is_trailer())
    }
}

/// Full detail record assembled from the detail, credits and videos endpoints.
///
/// A value of this type is only ever built when all three sub-fetches
/// succeeded; partial details are not representable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieDetails {
    pub id: MovieId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub runtime: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub budget: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tagline: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genres: Vec<Genre>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub production_companies: Vec<ProductionCompany>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub production_countries: Vec<ProductionCountry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub credits: Credits,
    #[cfg_attr(feature = "serde", serde(default))]
    pub videos: VideoList,
}

impl MovieDetails {
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            release_date: None,
            runtime: None,
            budget: 0,
            overview: None,
            tagline: None,
            genres: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            credits: Credits::default(),
            videos: VideoList::default(),
        }
    }

    /// Budget with thousands separators, e.g. `$63,000,000 USD`.
    pub fn formatted_budget(&self) -> String {
        let digits = self.budget.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${grouped} USD")
    }

    pub fn formatted_rating(&self) -> String {
        format_rating(self.vote_average)
    }

    pub fn tagline(&self) -> Option<&str> {
        non_empty(self.tagline.as_deref())
    }

    /// Leading cast entries in billing order.
    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..cast.len().min(limit)]
    }
}
