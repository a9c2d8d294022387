use marquee_model::Movie;
use tracing::debug;

use super::filter::{FilterToken, apply_filter};
use super::paginate::paginate;
use super::query::{FILTER_KEY, NavigationQuery, PAGE_KEY};

/// The mutable part of a browse session: which page and which letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseState {
    pub current_page: u32,
    pub filter: FilterToken,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            current_page: 1,
            filter: FilterToken::ALL,
        }
    }
}

impl BrowseState {
    /// Read `page` and `filter` from a query. Missing, zero or non-numeric
    /// pages read as 1; malformed filters read as "all".
    pub fn from_query(query: &NavigationQuery) -> Self {
        let current_page = query
            .get(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);
        let filter = query
            .get(FILTER_KEY)
            .map(FilterToken::parse)
            .unwrap_or_default();

        Self {
            current_page,
            filter,
        }
    }

    /// Canonical query for this state: `page` always, `filter` only when set.
    pub fn to_query(&self) -> NavigationQuery {
        let mut query = NavigationQuery::new();
        query.set(PAGE_KEY, self.current_page.to_string());
        if let Some(letter) = self.filter.letter() {
            query.set(FILTER_KEY, letter.to_string());
        }
        query
    }

    /// New filter; always returns to the first page.
    pub fn with_filter(self, raw: &str) -> Self {
        Self {
            current_page: 1,
            filter: FilterToken::parse(raw),
        }
    }

    /// New page; the filter is untouched.
    pub fn with_page(self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }

    pub fn derive<'a>(
        &self,
        items: &'a [Movie],
        page_size: usize,
    ) -> DerivedView<'a> {
        let filtered = apply_filter(items, self.filter);
        let page = paginate(&filtered, self.current_page, page_size);
        let page_items = page.items.to_vec();

        DerivedView {
            current_page: page.current_page,
            total_pages: page.total_pages,
            page_items,
            filtered,
            filter: self.filter,
        }
    }
}

/// What the presentation layer renders. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub filtered: Vec<&'a Movie>,
    pub total_pages: u32,
    pub page_items: Vec<&'a Movie>,
    /// Page actually displayed, always within `1..=max(total_pages, 1)`.
    pub current_page: u32,
    pub filter: FilterToken,
}

/// Outcome of reading state back from an externally changed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub state: BrowseState,
    /// Replacement query when the requested page had to be corrected.
    pub rewrite: Option<NavigationQuery>,
}

/// Derive browse state from `query`, correcting a page that lies beyond the
/// filtered list.
///
/// When the list has pages and the requested page exceeds them, the state
/// returns to page 1 and a rewritten query is supplied so the location stops
/// pointing at a page that cannot be shown.
pub fn reconcile(
    query: &NavigationQuery,
    items: &[Movie],
    page_size: usize,
) -> Reconciled {
    let mut state = BrowseState::from_query(query);
    let total_pages = state.derive(items, page_size).total_pages;

    if total_pages > 0 && state.current_page > total_pages {
        debug!(
            requested = state.current_page,
            total_pages,
            filter = %state.filter,
            "requested page out of range; resetting to first page"
        );
        state.current_page = 1;
        return Reconciled {
            state,
            rewrite: Some(state.to_query()),
        };
    }

    Reconciled {
        state,
        rewrite: None,
    }
}

/// The navigable location a session reads its query from and writes back to.
///
/// Writes replace the whole query (last write wins).
pub trait QueryLocation {
    fn query(&self) -> NavigationQuery;
    fn replace(&mut self, query: NavigationQuery);
}

impl QueryLocation for NavigationQuery {
    fn query(&self) -> NavigationQuery {
        self.clone()
    }

    fn replace(&mut self, query: NavigationQuery) {
        *self = query;
    }
}

/// A browse session over a borrowed snapshot, synchronized with a location.
#[derive(Debug)]
pub struct BrowseSession<'a, L> {
    items: &'a [Movie],
    page_size: usize,
    state: BrowseState,
    location: L,
}

impl<'a, L: QueryLocation> BrowseSession<'a, L> {
    /// Start a session, taking the initial state from the location.
    pub fn open(items: &'a [Movie], page_size: usize, location: L) -> Self {
        let mut session = Self {
            items,
            page_size,
            state: BrowseState::default(),
            location,
        };
        session.reconcile_from_query();
        session
    }

    pub fn state(&self) -> BrowseState {
        self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    pub fn view(&self) -> DerivedView<'a> {
        self.state.derive(self.items, self.page_size)
    }

    pub fn set_filter(&mut self, letter: &str) {
        self.state = self.state.with_filter(letter);
        self.location.replace(self.state.to_query());
    }

    pub fn set_page(&mut self, page: u32) {
        self.state = self.state.with_page(page);
        self.location.replace(self.state.to_query());
    }

    /// Re-read the location after an external change (back/forward, edited
    /// URL) and correct it if it points past the last page.
    pub fn reconcile_from_query(&mut self) -> BrowseState {
        let Reconciled { state, rewrite } =
            reconcile(&self.location.query(), self.items, self.page_size);
        self.state = state;
        if let Some(query) = rewrite {
            self.location.replace(query);
        }
        self.state
    }
}
