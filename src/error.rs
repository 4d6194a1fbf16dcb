use crate::Price;

/// Errors surfaced by chart construction.
///
/// All variants are raised synchronously before or during a single pass over
/// the input; there is no partial result to recover.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PnfError {
    /// The input series has no bars, so the first column cannot be seeded.
    #[error("empty input: at least one bar is required")]
    EmptyInput,

    #[error("invalid box size: {box_size}, must be positive and finite")]
    InvalidBoxSize { box_size: f64 },

    #[error("invalid reversal: {reversal}, must be at least 1")]
    InvalidReversal { reversal: u32 },

    /// Only raised in strict mode.
    #[error("malformed bar at index {index}: high={high}, low={low}")]
    MalformedBar {
        index: usize,
        high: Price,
        low: Price,
    },
}
