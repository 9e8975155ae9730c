//! Line scanner over a buffered `.msh` stream.
//!
//! Yields only meaningful lines: blank or whitespace-only lines and lines whose
//! first non-blank byte is `#` are skipped. Lines are read as raw bytes and
//! only meaningful ones are decoded, so comments and foreign sections may hold
//! any encoding. Invalid UTF-8 in a meaningful line is replaced by U+FFFD and
//! surfaces as a malformed header or record when its tokens are parsed. The
//! line buffer grows with the input, so arbitrarily long lines are returned
//! whole.

use crate::mesh_error::MeshImportError;
use std::io::BufRead;

/// Comment marker recognised at the start of a line.
pub const COMMENT_MARKER: u8 = b'#';

/// A meaningful line together with its physical 1-based line number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// First whitespace-delimited token, if any.
    pub fn first_token(&self) -> Option<&'a str> {
        self.text.split_whitespace().next()
    }
}

/// Reads meaningful lines from a buffered reader.
#[derive(Debug)]
pub struct LineScanner<R> {
    reader: R,
    buf: String,
    line_number: usize,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_number: 0,
        }
    }

    /// Physical 1-based line number of the last line read (0 before any read).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the next meaningful line without its line terminator, or
    /// `Ok(None)` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>, MeshImportError> {
        // Reuse the allocation of the previous line.
        let mut bytes = std::mem::take(&mut self.buf).into_bytes();
        loop {
            bytes.clear();
            if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let content = bytes.trim_ascii_start();
            if content.is_empty() || content[0] == COMMENT_MARKER {
                continue;
            }
            self.buf = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => {
                    log::debug!(
                        "line {} is not valid UTF-8; undecodable bytes replaced",
                        self.line_number
                    );
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            };
            return Ok(Some(Line {
                number: self.line_number,
                text: self.buf.trim_end_matches(['\n', '\r']),
            }));
        }
    }
}
