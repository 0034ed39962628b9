use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliderError {
    #[error("slide container is missing")]
    MissingContainer,

    #[error("a slider needs at least 2 slides, found {found}")]
    NotEnoughSlides { found: usize },

    #[error("invalid breakpoint width: {0}")]
    InvalidBreakpoint(String),

    #[error("invalid slide target: {0}")]
    InvalidTarget(String),
}

pub type Result<T> = std::result::Result<T, SliderError>;
