use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure talking to a remote endpoint
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Pipeline stage a parse failure was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    SearchPage,
    DetailOffers,
    CheapestOffer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::SearchPage => "search page",
            Stage::DetailOffers => "detail page offers",
            Stage::CheapestOffer => "detail page cheapest offer",
        };
        f.write_str(label)
    }
}

/// Errors that fail a search outright. None of them carry a partial result.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search page unavailable (status {status})")]
    UpstreamUnavailable { status: u16 },

    #[error("failed to parse {stage}: {reason}")]
    ParseFailure { stage: Stage, reason: String },

    #[error("failed to shorten {link}")]
    Shortening {
        link: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SearchError {
    pub(crate) fn parse(stage: Stage, reason: impl Into<String>) -> Self {
        SearchError::ParseFailure {
            stage,
            reason: reason.into(),
        }
    }
}

/// Key-shop failures. Recorded on the result, never returned from a search.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyShopError {
    #[error("key shop listing unavailable (status {status})")]
    Unavailable { status: u16 },

    #[error("failed to parse key shop listing: {reason}")]
    ParseFailure { reason: String },

    #[error("failed to fetch key shop listing: {reason}")]
    Fetch { reason: String },

    #[error("failed to shorten key shop link {link}: {reason}")]
    Shortening { link: String, reason: String },
}

impl From<FetchError> for KeyShopError {
    fn from(err: FetchError) -> Self {
        KeyShopError::Fetch {
            reason: err.to_string(),
        }
    }
}

/// Errors raised by the read accessors on a `SearchResult`
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("no successful search has been performed")]
    NotSearched,

    #[error("no offer from vendor {vendor:?}")]
    NotFound { vendor: String },

    #[error("offer from {shop} has an unparseable price {price:?}")]
    InvalidPrice { shop: String, price: String },
}
