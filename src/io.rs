//! Abstract byte-addressable I/O interface.
//!
//! The TRE codec and the J2K tile codec bridge never talk to a file handle
//! or a `Vec<u8>` directly; they talk to this trait. A caller that wants to
//! read from an actual file or socket supplies their own adapter. This
//! crate ships only the in-memory adapter the J2K writer needs internally
//! for its owned compressed-output buffer.

use crate::error::{NitfError, Result};

/// Seek origin, matching `fseek`'s `whence` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Set,
    Cur,
    End,
}

/// Synchronous, byte-addressable source/sink. All operations are total:
/// they return `Ok` or a populated `NitfError`, never panic on caller
/// misuse of a well-formed interface implementation.
pub trait IoInterface {
    /// Reads exactly `buf.len()` bytes. A short read is an error.
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Writes exactly `buf.len()` bytes.
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Seeks relative to `whence`, returning the new absolute offset.
    fn seek(&mut self, pos: i64, whence: Whence) -> Result<i64>;

    /// Current absolute offset.
    fn tell(&mut self) -> Result<i64>;

    /// Total length of the underlying resource.
    fn size(&mut self) -> Result<i64>;

    /// Releases the resource. Never fails.
    fn close(&mut self);
}

/// A growable in-memory `IoInterface`, used by the J2K writer for its
/// owned compressed-output buffer and by tests as a stand-in for file I/O.
#[derive(Debug, Default)]
pub struct MemoryIo {
    buf: Vec<u8>,
    pos: usize,
}

impl MemoryIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl IoInterface for MemoryIo {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos.checked_add(buf.len()).ok_or_else(|| {
            NitfError::io_failure("read length overflows buffer position")
        })?;
        if end > self.buf.len() {
            return Err(NitfError::io_failure(format!(
                "short read: wanted {} bytes at offset {}, buffer has {}",
                buf.len(),
                self.pos,
                self.buf.len()
            )));
        }
        buf.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        let end = self.pos + buf.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(())
    }

    fn seek(&mut self, pos: i64, whence: Whence) -> Result<i64> {
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => self.pos as i64,
            Whence::End => self.buf.len() as i64,
        };
        let target = base + pos;
        if target < 0 {
            return Err(NitfError::io_failure(format!(
                "seek to negative offset {}",
                target
            )));
        }
        self.pos = target as usize;
        Ok(target)
    }

    fn tell(&mut self) -> Result<i64> {
        Ok(self.pos as i64)
    }

    fn size(&mut self) -> Result<i64> {
        Ok(self.buf.len() as i64)
    }

    fn close(&mut self) {}
}
