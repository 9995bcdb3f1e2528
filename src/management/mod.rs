mod index;
mod rate_limit;

pub use index::SongIndex;
pub use rate_limit::RateLimiter;
