pub use detector::*;
pub use history::*;
pub use verdict::*;

mod detector;
mod history;
mod verdict;
