//! Error taxonomy for the NCA codec.
//!
//! Every failure is local and permanent: a malformed file stays malformed, so
//! nothing here is retryable and nothing is repaired on the caller's behalf.

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, NcaError>;

/// Errors raised while encoding or decoding NCA data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NcaError {
    /// A read went past the end of the buffer
    #[error("attempted to read {requested} bytes with only {remaining} remaining")]
    OutOfBounds { requested: u64, remaining: u64 },

    /// The header carries a different type tag than the decoder expects
    #[error("type tag mismatch: actual '{actual}', expected '{expected}'")]
    FormatMismatch { actual: String, expected: String },

    /// The header names a compression algorithm other than NONE
    #[error("unsupported compression algorithm '{actual}'")]
    UnsupportedCompression { actual: String },

    /// The blob length disagrees with the size declared in the header
    #[error("header declares a {declared} byte blob but {actual} bytes were present or consumed")]
    TruncatedOrOverlongBlob { declared: u64, actual: u64 },

    /// Pixel buffer length does not match the stored dimensions
    #[error("pixel data is {actual} bytes but dimensions require {expected}")]
    PixelDataSizeMismatch { expected: u64, actual: u64 },

    /// Flattened bone hierarchy entries do not describe a single rooted tree
    #[error("malformed bone hierarchy at entry {index}: {reason}")]
    MalformedHierarchy { index: usize, reason: String },

    /// A bone tree reaches the same node twice
    #[error("bone hierarchy contains a cycle through node {node}")]
    CyclicHierarchy { node: usize },

    /// Type tag is not part of the NCA tag table
    #[error("unknown asset type '{0}'")]
    UnknownAssetType(String),

    /// Type tag is reserved but has no payload codec
    #[error("asset type '{0}' has no codec")]
    UnsupportedAssetType(String),

    /// A length-prefixed string is not valid UTF-8
    #[error("string at byte {position} is not valid UTF-8")]
    InvalidString { position: usize },

    /// Audio channel length disagrees with the declared samples per channel
    #[error("audio channel has {actual} samples, expected {expected}")]
    ChannelLengthMismatch { expected: u64, actual: u64 },

    /// An animation clip lists the same bone twice
    #[error("bone '{0}' appears more than once in the animation clip")]
    DuplicateBone(String),

    /// A count does not fit in the wire or host integer width
    #[error("count {0} does not fit the serialized field")]
    CountOverflow(u64),
}
