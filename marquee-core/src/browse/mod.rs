//! Filter + pagination state over an aggregated snapshot.
//!
//! Everything here is synchronous and pure: the snapshot is borrowed, never
//! mutated, and every view is recomputed from `(snapshot, state, page size)`.
//! The only state, [`BrowseState`], mirrors a navigable query with `page` and
//! `filter` keys.

pub mod filter;
pub mod pager;
pub mod paginate;
pub mod query;
pub mod state;

pub use filter::{FilterToken, apply_filter, derive_filter_key};
pub use pager::{DEFAULT_WINDOW, PagerItem, page_window};
pub use paginate::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use query::NavigationQuery;
pub use state::{
    BrowseSession, BrowseState, DerivedView, QueryLocation, Reconciled,
    reconcile,
};
