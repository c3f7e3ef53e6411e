pub mod ggdeals;
pub mod http;
pub mod markup;
pub mod traits;
pub mod types;

pub use ggdeals::DealSearcher;
pub use http::{ReqwestFetcher, TinyUrlShortener};
pub use traits::{DealSource, LinkShortener, PageFetcher};
pub use types::{FetchedPage, SearchConfig};
