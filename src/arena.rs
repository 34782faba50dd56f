//! Scan-scoped bump allocation for derived predicate values.
//!
//! The arena hands out [`Bytes`] carved from large shared chunks. Each handle
//! keeps its chunk alive, so values stay valid after [`Arena::reset`] or after
//! the arena itself is dropped, while the scan pays for one heap allocation
//! per chunk instead of one per value.

use bytes::{Bytes, BytesMut};

use crate::error::{PredicateError, Result};

const DEFAULT_INITIAL_CHUNK_SIZE: usize = 1024;
const DEFAULT_MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Chunk sizing for an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaOptions {
    /// Size of the first chunk. Later chunks double up to `max_chunk_size`.
    pub initial_chunk_size: usize,
    /// Largest chunk the arena grows to; bigger requests get a dedicated chunk.
    pub max_chunk_size: usize,
}

impl Default for ArenaOptions {
    fn default() -> Self {
        Self {
            initial_chunk_size: DEFAULT_INITIAL_CHUNK_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl ArenaOptions {
    /// Sets the size of the first chunk.
    #[must_use]
    pub fn with_initial_chunk_size(mut self, size: usize) -> Self {
        self.initial_chunk_size = size;
        self
    }

    /// Sets the growth cap for chunks.
    #[must_use]
    pub fn with_max_chunk_size(mut self, size: usize) -> Self {
        self.max_chunk_size = size;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.initial_chunk_size == 0 || self.initial_chunk_size > self.max_chunk_size {
            return Err(PredicateError::InvalidArenaOptions {
                initial: self.initial_chunk_size,
                max: self.max_chunk_size,
            });
        }
        Ok(())
    }
}

/// Bump allocator whose values live as long as any handle to them.
///
/// Allocation takes `&mut self`: one scan's setup owns its arena exclusively.
#[derive(Debug)]
pub struct Arena {
    options: ArenaOptions,
    chunk: BytesMut,
    next_chunk_size: usize,
    allocated: usize,
    chunks: usize,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Creates an arena with default chunk sizing.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(ArenaOptions::default())
    }

    /// Creates an arena with explicit chunk sizing.
    pub fn with_options(options: ArenaOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_options(options))
    }

    fn from_options(options: ArenaOptions) -> Self {
        Self {
            options,
            chunk: BytesMut::new(),
            next_chunk_size: options.initial_chunk_size,
            allocated: 0,
            chunks: 0,
        }
    }

    /// Copies `data` into the arena.
    pub fn alloc_copy(&mut self, data: &[u8]) -> Bytes {
        if data.is_empty() {
            return Bytes::new();
        }
        self.reserve(data.len());
        self.chunk.extend_from_slice(data);
        self.finish(data.len())
    }

    /// Copies `data` followed by one `suffix` byte into the arena.
    pub fn alloc_with_suffix(&mut self, data: &[u8], suffix: u8) -> Bytes {
        let len = data.len() + 1;
        self.reserve(len);
        self.chunk.extend_from_slice(data);
        self.chunk.extend_from_slice(&[suffix]);
        self.finish(len)
    }

    /// Bytes handed out since creation or the last reset.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.allocated
    }

    /// Number of chunks allocated since creation or the last reset.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Starts over with a fresh chunk. Previously returned values stay valid.
    pub fn reset(&mut self) {
        self.chunk = BytesMut::new();
        self.next_chunk_size = self.options.initial_chunk_size;
        self.allocated = 0;
        self.chunks = 0;
    }

    fn reserve(&mut self, len: usize) {
        if self.chunk.capacity() - self.chunk.len() >= len {
            return;
        }
        let max = self.options.max_chunk_size;
        let mut size = self.next_chunk_size;
        while size < len && size < max {
            size = size.saturating_mul(2).min(max);
        }
        let size = size.max(len);
        self.next_chunk_size = size.saturating_mul(2).min(max);
        // The old chunk's tail is abandoned; its handed-out prefixes remain shared.
        self.chunk = BytesMut::with_capacity(size);
        self.chunks += 1;
    }

    fn finish(&mut self, len: usize) -> Bytes {
        self.allocated += len;
        self.chunk.split().freeze()
    }
}
