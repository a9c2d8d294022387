//! JSON shapes returned by the movie endpoints.

use marquee_core::PagerItem;
use marquee_model::{
    CastMember, ImageBase, Movie, MovieDetails, MovieId, PosterSize,
    ProfileSize, Video,
};
use serde::Serialize;

/// Number of cast members shown on the detail page.
pub const TOP_CAST_LIMIT: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub rating: String,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie, images: &ImageBase) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| images.poster_url(path, PosterSize::card())),
            rating: movie.formatted_rating(),
            release_date: movie.release_date().map(str::to_string),
            release_year: movie.release_year(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRatedResponse {
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseResponse {
    pub movies: Vec<MovieCard>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_matches: usize,
    /// Active letter, empty for "all".
    pub filter: String,
    /// Canonical `page`/`filter` query for the state being shown.
    pub query: String,
    /// The incoming query pointed past the last page and was replaced.
    pub query_rewritten: bool,
    pub pager: Vec<PagerItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoView {
    pub name: String,
    pub kind: String,
    pub embed_url: String,
}

impl From<&Video> for VideoView {
    fn from(video: &Video) -> Self {
        Self {
            name: video.name.clone(),
            kind: video.kind.clone(),
            embed_url: video.embed_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CastView {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

impl CastView {
    fn from_member(member: &CastMember, images: &ImageBase) -> Self {
        Self {
            name: member.name.clone(),
            character: member.character.clone(),
            profile_url: member
                .profile_path
                .as_deref()
                .map(|path| images.profile_url(path, ProfileSize::W185)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub id: MovieId,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub rating: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    /// Budget in USD, zero when unknown.
    pub budget: u64,
    pub budget_display: String,
    pub production_companies: Vec<String>,
    /// ISO 3166-1 country codes.
    pub production_countries: Vec<String>,
    pub main_trailer: Option<VideoView>,
    pub other_clips: Vec<VideoView>,
    pub cast: Vec<CastView>,
}

impl DetailView {
    pub fn from_details(details: &MovieDetails, images: &ImageBase) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            tagline: details.tagline().map(str::to_string),
            overview: details.overview.clone(),
            poster_url: details
                .poster_path
                .as_deref()
                .map(|path| images.poster_url(path, PosterSize::detail())),
            rating: details.formatted_rating(),
            release_date: details.release_date.clone(),
            runtime: details.runtime,
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            budget: details.budget,
            budget_display: details.formatted_budget(),
            production_companies: details
                .production_companies
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            production_countries: details
                .production_countries
                .iter()
                .map(|c| c.iso_3166_1.clone())
                .collect(),
            main_trailer: details.videos.main_trailer().map(VideoView::from),
            other_clips: details
                .videos
                .other_clips()
                .map(VideoView::from)
                .collect(),
            cast: details
                .top_cast(TOP_CAST_LIMIT)
                .iter()
                .map(|member| CastView::from_member(member, images))
                .collect(),
        }
    }
}
