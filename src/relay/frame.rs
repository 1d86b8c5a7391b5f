//! Frame types relayed between producer and clients
//!
//! The relay treats frames as opaque: a type tag and a payload byte sequence,
//! forwarded unmodified with no parsing or validation of the contents.

use bytes::Bytes;

/// Type tag of a relayed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 text frame (log lines)
    Text,
    /// Binary frame
    Binary,
}

/// One discrete message unit
///
/// Cheap to clone: the payload is reference-counted via `Bytes`, so fanning a
/// frame out to N clients shares one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Type tag, forwarded as-is
    pub kind: FrameKind,
    /// Payload, forwarded byte-for-byte
    pub payload: Bytes,
}

impl Frame {
    /// Create a text frame
    pub fn text(payload: impl Into<Bytes>) -> Self {
        Self {
            kind: FrameKind::Text,
            payload: payload.into(),
        }
    }

    /// Create a binary frame
    pub fn binary(payload: impl Into<Bytes>) -> Self {
        Self {
            kind: FrameKind::Binary,
            payload: payload.into(),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
