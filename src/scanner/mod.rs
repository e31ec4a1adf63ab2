//! Raw-buffer scanners
//!
//! Every scanner in this module works on undecoded bytes and depends on
//! nothing but the immutable input buffer, so they can all run in parallel
//! over the same slice.

pub mod census;
pub mod content;
pub mod signature;
pub mod structure;

/// Byte view the content-stream scanner operates on.
///
/// The default [`RawContent`] view does not decode compressed stream bodies,
/// so rendering commands inside FlateDecode data are invisible to it — a
/// known false-negative source. A decompression-aware source can be
/// substituted without changing any scanner contract.
pub trait ContentSource: Send + Sync {
    fn bytes(&self) -> &[u8];
}

/// The raw, undecoded input buffer.
pub struct RawContent<'a> {
    data: &'a [u8],
}

impl<'a> RawContent<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ContentSource for RawContent<'_> {
    fn bytes(&self) -> &[u8] {
        self.data
    }
}
