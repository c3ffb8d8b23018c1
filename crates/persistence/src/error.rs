// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while reading or writing fabric snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The snapshot file could not be read or written.
    Io {
        /// The file involved.
        path: String,
        /// The underlying error.
        message: String,
    },
    /// Serialization/deserialization error.
    SerializationError(String),
    /// The snapshot parsed but is not internally consistent.
    InvalidSnapshot(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "Snapshot I/O error ({path}): {message}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InvalidSnapshot(msg) => write!(f, "Invalid snapshot: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
