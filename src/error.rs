use thiserror::Error;

/// Errors reported by the rasterization pipeline.
///
/// Every variant is a programmer-error or environment class surfaced at the
/// failing call; none are transient and none are retried. A draw call that
/// trips over a malformed mesh fails before writing any pixel.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A vertex, channel, or attribute slot index beyond stored bounds.
    #[error("{what} index {index} out of range (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// An attribute fetched with an arity different from its stored dimension.
    #[error("attribute {index} stored with dimension {stored}, accessed as dimension {requested}")]
    DimensionMismatch {
        index: usize,
        stored: usize,
        requested: usize,
    },

    /// A uniform read before being set, or read at the wrong type.
    #[error("uniform `{0}` is not bound at the requested type")]
    UnboundUniform(String),

    /// A draw issued through a shader program whose stages were deleted.
    #[error("shader program has no active stages")]
    InvalidProgram,

    /// A draw issued before the frame was cleared.
    #[error("draw call issued before clear()")]
    FrameNotCleared,

    /// The display collaborator could not create or present a surface.
    #[error("display surface error: {0}")]
    Surface(String),
}
