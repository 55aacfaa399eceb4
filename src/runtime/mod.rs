//! Runtime execution for Seasonlang programs by direct tree walking

mod evaluator;
mod value;

pub use evaluator::Evaluator;
pub use value::Value;
