//! Rate limiter implementations.

mod sliding_window;

pub use sliding_window::SlidingWindowRateLimiter;
