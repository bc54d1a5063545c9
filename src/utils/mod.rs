pub mod shortcode;
pub mod time;

pub use shortcode::{DEFAULT_SHORTCODE_LENGTH, generate_shortcode};
pub use time::{ONE_MONTH_SECONDS, ONE_YEAR_SECONDS, month_tag, next_month_start};
