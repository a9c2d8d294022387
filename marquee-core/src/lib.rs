//! Core library for Marquee.
//!
//! Three layers, leaf first:
//!
//! - [`providers`]: the catalog client seam ([`CatalogClient`]) and the TMDB
//!   implementation that talks to the upstream over reqwest.
//! - [`aggregate`]: drives a client across many listing pages, either in
//!   bounded concurrent batches that tolerate per-page failures, or one page at
//!   a time with all-or-nothing semantics.
//! - [`browse`]: a pure filter + pagination engine over an aggregated snapshot,
//!   kept in sync with a navigable `page`/`filter` query.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod aggregate;
pub mod browse;
pub mod providers;

pub use aggregate::{
    Aggregate, AggregationSettings, BatchedAggregator, PageOutcome,
    SequentialAggregator,
};
pub use browse::{
    BrowseSession, BrowseState, DerivedView, FilterToken, NavigationQuery,
    PagerItem, QueryLocation, Reconciled,
};
pub use providers::{ApiKey, CatalogClient, FetchFailure, Listing, TmdbClient};

pub use marquee_model as model;
