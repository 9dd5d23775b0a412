//! TVL reading providers.

mod http_tvl;

pub use http_tvl::HttpTvlSource;
