//! Common types shared by the NAV2 file, graph and CLI crates

mod io;

pub use io::{ReadVec3Ext, WriteVec3Ext};

/// Represents a 3D position
pub type Vec3 = glam::Vec3;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The stream does not start with the `NAV2` magic constant.
    #[error("not a NAV2 stream: bad magic number")]
    MalformedHeader,

    /// The stream carries a version number no codec variant is registered for.
    #[error("unsupported NAV2 version {version}")]
    UnsupportedVersion { version: u32 },

    /// The declared record counts imply more bytes than the stream holds.
    #[error("truncated input while reading {what}: need {expected} bytes, have {actual}")]
    TruncatedInput {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A node already holds the maximum number of links.
    #[error("node {node} already holds the maximum of {limit} links")]
    CapacityExceeded { node: usize, limit: usize },

    /// An index or position key does not resolve to an existing record.
    #[error("dangling {what} reference: {detail}")]
    DanglingReference { what: &'static str, detail: String },

    /// A graph holds more records than the format's index fields can address.
    #[error("{what} count {count} exceeds the format limit of {limit}")]
    FormatLimitExceeded {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    /// An edict key shape cannot be represented by the requested format version.
    #[error("edict key shape is not representable in NAV2 version {version}")]
    EdictShapeMismatch { version: u32 },

    /// A JSON document violates the NAV2 document schema.
    #[error("invalid NAV2 document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for NAV2 operations
pub type Result<T> = std::result::Result<T, Error>;
