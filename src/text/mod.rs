//! Body text processing.

mod normalize;
mod reading_time;

pub use normalize::normalize;
pub use reading_time::{DEFAULT_WORDS_PER_MINUTE, format_reading_time, reading_time};
