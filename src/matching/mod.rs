mod diff;
mod normalize;
mod select;
mod similarity;

pub use diff::find_missing;
pub use select::{DEFAULT_MIN_SCORE, select_best};
pub use similarity::DEFAULT_PRESENCE_THRESHOLD;
