//! Recommendation scoring and free-text meal parsing. Everything here is
//! synchronous and works on snapshots handed in by the caller.

pub mod distance;
pub mod engine;
pub mod extractor;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod period;
pub mod random;
pub mod scorer;

pub use engine::RecommendationEngine;
pub use matcher::MenuIndex;
pub use model::{MealPeriod, MealRecord, MenuItem, ParsedMeal, RecommendationCandidate};
pub use parser::{parse_meal, parse_meal_with};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
