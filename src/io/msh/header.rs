//! Section headers: marker search, count lines and the `$MeshFormat` block.

use super::scanner::LineScanner;
use crate::mesh_error::{MeshImportError, Section};
use std::io::BufRead;

/// Integer width of local node and tree counts.
pub type LocalIndex = u32;

const MESH_FORMAT_MARKER: &str = "$MeshFormat";

/// Advances `scanner` past the line whose first token is the marker of
/// `section`.
///
/// Any other section met on the way is skipped. If a `$MeshFormat` block is
/// passed, the raw line following its marker is returned so the caller can
/// validate it.
pub fn locate_section<R: BufRead>(
    scanner: &mut LineScanner<R>,
    section: Section,
) -> Result<Option<String>, MeshImportError> {
    let mut format_line = None;
    loop {
        let Some(line) = scanner.next_line()? else {
            return Err(MeshImportError::MalformedHeader {
                section,
                line: scanner.line_number(),
                reason: format!("end of file before `{}`", section.marker()),
            });
        };
        let token = line.first_token();
        if token == Some(section.marker()) {
            return Ok(format_line);
        }
        if token == Some(MESH_FORMAT_MARKER) {
            format_line = scanner.next_line()?.map(|l| l.text.to_owned());
        }
    }
}

/// Parses the count line that follows a section marker.
///
/// Only the first token is read. The value must be a non-negative integer that
/// fits [`LocalIndex`].
pub fn read_count<R: BufRead>(
    scanner: &mut LineScanner<R>,
    section: Section,
) -> Result<LocalIndex, MeshImportError> {
    let malformed = |line: usize, reason: String| MeshImportError::MalformedHeader {
        section,
        line,
        reason,
    };
    let Some(line) = scanner.next_line()? else {
        return Err(malformed(
            scanner.line_number(),
            "end of file before the count line".into(),
        ));
    };
    let token = line.first_token().unwrap_or_default();
    let count = match token.parse::<i64>() {
        Ok(count) if count >= 0 => count,
        Ok(count) => return Err(malformed(line.number, format!("negative count {count}"))),
        // Wider than i64 but still a plain non-negative integer.
        Err(_) if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(MeshImportError::CountOverflow {
                section,
                count: token.to_string(),
            });
        }
        Err(_) => return Err(malformed(line.number, format!("invalid count `{token}`"))),
    };
    LocalIndex::try_from(count).map_err(|_| MeshImportError::CountOverflow {
        section,
        count: token.to_string(),
    })
}

/// Contents of the `$MeshFormat` header line (`version file-type data-size`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshFormat {
    pub version: String,
    pub file_type: u32,
    pub data_size: Option<u32>,
}

impl MeshFormat {
    pub fn parse(line: &str) -> Result<Self, MeshImportError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| MeshImportError::UnsupportedFormat("missing mesh format version".into()))?
            .to_string();
        let file_type = parts
            .next()
            .ok_or_else(|| MeshImportError::UnsupportedFormat("missing mesh format type".into()))?
            .parse::<u32>()
            .map_err(|_| MeshImportError::UnsupportedFormat(format!("invalid file type in `{line}`")))?;
        let data_size = parts.next().and_then(|raw| raw.parse::<u32>().ok());
        Ok(Self {
            version,
            file_type,
            data_size,
        })
    }

    /// Accepts ASCII files of the 2.x family only.
    pub fn validate(&self) -> Result<(), MeshImportError> {
        if self.file_type != 0 {
            return Err(MeshImportError::UnsupportedFormat(
                "binary .msh files are not supported".into(),
            ));
        }
        if self.version.split('.').next() != Some("2") {
            return Err(MeshImportError::UnsupportedFormat(format!(
                "gmsh version {} (only 2.x is supported)",
                self.version
            )));
        }
        Ok(())
    }
}
