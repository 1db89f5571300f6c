//! In-memory request throttling.
//!
//! Rate limiting is advisory: state is process-local and rebuilt from zero on
//! restart.

pub mod registry;
pub mod token_bucket;

pub use registry::{IDLE_TIMEOUT, RateLimiterRegistry, SWEEP_INTERVAL};
pub use token_bucket::TokenBucket;
