//! Low-level, positioned, byte-accurate reads over a Norton Guide file.
//!
//! Everything here mirrors the handful of primitives the on-disk format is
//! built from: XOR-obfuscated bytes, little-endian words and longs, sentinel
//! offsets, and nul-terminated strings that have been run-length encoded.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use scroll::Pread;

use crate::error::{Error, Result};

/// Every byte and word in a guide file is masked with this value.
const XOR_MASK: u8 = 0x1A;

/// Sentinel written in place of a 32-bit offset that doesn't point anywhere.
const NO_OFFSET_LONG: u32 = 0xFFFF_FFFF;

/// Sentinel written in place of a 16-bit index that doesn't point anywhere.
const NO_OFFSET_WORD: u16 = 0xFFFF;

/// A positioned byte source over an open guide file, plus the handful of
/// decoders (XOR, RLE, sentinel offsets) every higher-level reader needs.
pub struct Reader {
    file: Option<File>,
    size: u64,
}

impl Reader {
    /// Open `path` for reading and record its size.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Reader {
            file: Some(file),
            size,
        })
    }

    /// Total size of the underlying file, in bytes.
    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `true` once [`close`](Reader::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Release the underlying file handle. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        self.file = None;
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| Error::Io(io::Error::new(io::ErrorKind::Other, "reader is closed")))
    }

    /// Current position of the cursor.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.file_mut()?.stream_position()?)
    }

    /// Move the cursor to an absolute position.
    pub fn seek(&mut self, pos: u64) -> Result<u64> {
        Ok(self.file_mut()?.seek(SeekFrom::Start(pos))?)
    }

    /// Move the cursor by `n` bytes, which may be negative.
    pub fn skip(&mut self, n: i64) -> Result<u64> {
        Ok(self.file_mut()?.seek(SeekFrom::Current(n))?)
    }

    /// `true` once the cursor has reached or passed the end of the file.
    pub fn eof(&mut self) -> Result<bool> {
        Ok(self.position()? >= self.size)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.file_mut()?.read_exact(buf)?;
        Ok(())
    }

    fn decrypt(buf: &mut [u8], decrypt: bool) {
        if decrypt {
            for b in buf.iter_mut() {
                *b ^= XOR_MASK;
            }
        }
    }

    /// Read one byte, optionally un-masking it.
    pub fn read_byte(&mut self, decrypt: bool) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Self::decrypt(&mut buf, decrypt);
        Ok(buf[0])
    }

    /// Read a little-endian word, optionally un-masking each byte first.
    pub fn read_word(&mut self, decrypt: bool) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Self::decrypt(&mut buf, decrypt);
        Ok(buf[..].pread_with::<u16>(0, scroll::LE)?)
    }

    /// Read a word without moving the cursor, regardless of whether the read succeeds.
    pub fn peek_word(&mut self, decrypt: bool) -> Result<u16> {
        let pos = self.position()?;
        let result = self.read_word(decrypt);
        self.seek(pos)?;
        result
    }

    /// Read a long as two little-endian words.
    pub fn read_long(&mut self, decrypt: bool) -> Result<u32> {
        let low = self.read_word(decrypt)? as u32;
        let high = self.read_word(decrypt)? as u32;
        Ok(low | (high << 16))
    }

    /// Read a 32-bit offset, mapping the "absent" sentinel to `-1`.
    pub fn read_offset(&mut self) -> Result<i64> {
        let value = self.read_long(true)?;
        if value == NO_OFFSET_LONG {
            Ok(-1)
        } else {
            Ok(value as i64)
        }
    }

    /// Read a 16-bit index, mapping the "absent" sentinel to `-1`.
    pub fn read_index(&mut self) -> Result<i32> {
        let value = self.read_word(true)?;
        if value == NO_OFFSET_WORD {
            Ok(-1)
        } else {
            Ok(value as i32)
        }
    }

    /// Read exactly `n` bytes and decode them as a raw-codepoint string,
    /// truncated at the first NUL. The cursor always advances by `n`.
    pub fn read_str(&mut self, n: usize, decrypt: bool) -> Result<String> {
        let mut buf = vec![0u8; n];
        self.read_exact(&mut buf)?;
        Self::decrypt(&mut buf, decrypt);
        Ok(buf
            .into_iter()
            .take_while(|&b| b != 0)
            .map(|b| b as char)
            .collect())
    }

    /// Read a nul-terminated string from a fixed-size field, leaving the
    /// cursor one byte past the NUL that terminated it (or past the whole
    /// field, if no NUL was found).
    pub fn read_strz(&mut self, max_len: usize, decrypt: bool) -> Result<String> {
        let start = self.position()?;
        let s = self.read_str(max_len, decrypt)?;
        self.seek(start + s.chars().count() as u64 + 1)?;
        Ok(s)
    }

    /// Skip the remainder of the current entry: two bytes, then the body,
    /// whose size is the next word, then the 22 bytes of fixed header that
    /// follow it.
    pub fn skip_entry(&mut self) -> Result<()> {
        self.skip(2)?;
        let size = self.read_word(true)?;
        self.skip(size as i64 + 22)?;
        Ok(())
    }

    /// Expand a run-length-encoded string: `0xFF` followed by a count byte
    /// `n` expands to `n` spaces, and `0xFF 0xFF` expands to a single space.
    pub fn unrle(s: &str) -> String {
        let chars: Vec<char> = s.chars().collect();
        let mut out = String::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] as u32 == 0xFF {
                match chars.get(i + 1) {
                    Some(&marker) if marker as u32 == 0xFF => {
                        out.push(' ');
                        i += 2;
                    }
                    Some(&count) => {
                        for _ in 0..(count as u32) {
                            out.push(' ');
                        }
                        i += 2;
                    }
                    None => {
                        out.push(' ');
                        i += 1;
                    }
                }
            } else {
                out.push(chars[i]);
                i += 1;
            }
        }
        out
    }
}
