use thiserror::Error;

/// Input contract violations raised by the recommendation and recording core.
///
/// A meal that cannot be parsed is not an error; it is reported as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("recommendation count must be positive")]
    ZeroCount,
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
    #[error("menu name must not be empty")]
    EmptyMenuName,
}
