use std::fmt;

/// Default TMDB image CDN root.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Poster widths accepted by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    W92,
    W154,
    W185,
    W300,
    W342,
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W92 => "w92",
            PosterSize::W154 => "w154",
            PosterSize::W185 => "w185",
            PosterSize::W300 => "w300",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
            PosterSize::W780 => "w780",
            PosterSize::Original => "original",
        }
    }

    /// Size used for grid cards.
    pub const fn card() -> Self {
        PosterSize::W300
    }

    /// Size used on the detail page.
    pub const fn detail() -> Self {
        PosterSize::W500
    }
}

/// Person profile widths accepted by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileSize {
    W45,
    W185,
    H632,
    Original,
}

impl ProfileSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSize::W45 => "w45",
            ProfileSize::W185 => "w185",
            ProfileSize::H632 => "h632",
            ProfileSize::Original => "original",
        }
    }
}

/// Root URL that image paths (`/abc.jpg`) are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBase(String);

impl ImageBase {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn poster_url(&self, path: &str, size: PosterSize) -> String {
        self.join(size.as_str(), path)
    }

    pub fn profile_url(&self, path: &str, size: ProfileSize) -> String {
        self.join(size.as_str(), path)
    }

    fn join(&self, size: &str, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/{}{}", self.0, size, path)
        } else {
            format!("{}/{}/{}", self.0, size, path)
        }
    }
}

impl Default for ImageBase {
    fn default() -> Self {
        Self::new(TMDB_IMAGE_BASE)
    }
}

impl fmt::Display for ImageBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
