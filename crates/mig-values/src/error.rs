//! Container access errors

/// Errors mutating a container value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Array index past the end
    #[error("array index {index} out of bounds for count {count}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Element count
        count: usize,
    },

    /// Dictionary insertion expects `Some` or `Nil`
    #[error("dictionary value must be optional, got {0}")]
    NotOptional(&'static str),
}
