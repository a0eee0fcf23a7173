//! Side-channel row-degree files
//!
//! A matrix file may be accompanied by a file holding one integer per row,
//! the number of entries in that row. When present it lets the construction
//! pipeline skip its counting pass. The file is either ASCII (whitespace
//! separated integers) or packed little-endian integers of a fixed width;
//! the encoding is guessed from the file size and its leading bytes.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{Result, SparrowError};
use crate::matrix::config::{DegreeEncoding, IndexWidth, LoadConfig};

/// Location of the degree file that belongs to `matrix_path`
pub fn degrees_path(matrix_path: &Path, config: &LoadConfig) -> PathBuf {
    let mut path = OsString::from(matrix_path.as_os_str());
    path.push(&config.degrees_suffix);
    PathBuf::from(path)
}

/// Guesses the encoding of a degree file from its contents
///
/// Binary if the size is exactly one `index_width` entry per row, or at least
/// that large with a byte among the first `binary_probe_len` that is neither
/// an ASCII digit nor whitespace. ASCII otherwise.
pub fn detect_encoding(bytes: &[u8], n_rows: usize, config: &LoadConfig) -> DegreeEncoding {
    let expected = config.index_width.bytes() * n_rows;

    if bytes.len() == expected {
        return DegreeEncoding::Binary(config.index_width);
    }

    let has_binary_bytes = bytes
        .iter()
        .take(config.binary_probe_len)
        .any(|b| !b.is_ascii_digit() && !b.is_ascii_whitespace());

    if bytes.len() >= expected && has_binary_bytes {
        DegreeEncoding::Binary(config.index_width)
    } else {
        DegreeEncoding::Ascii
    }
}

/// Decodes degree data in the given encoding
///
/// Binary data yields exactly `n_rows` degrees; ASCII data yields every
/// integer in the file, whatever their number.
pub fn parse_degrees(bytes: &[u8], n_rows: usize, encoding: DegreeEncoding) -> Result<Vec<usize>> {
    match encoding {
        DegreeEncoding::Binary(width) => parse_binary(bytes, n_rows, width),
        DegreeEncoding::Ascii => parse_ascii(bytes),
    }
}

fn parse_binary(bytes: &[u8], n_rows: usize, width: IndexWidth) -> Result<Vec<usize>> {
    let needed = width.bytes() * n_rows;
    if bytes.len() < needed {
        return Err(SparrowError::InvalidDegrees {
            reason: format!("binary degree data holds {} bytes, need {}", bytes.len(), needed),
        });
    }

    bytes[..needed]
        .chunks_exact(width.bytes())
        .map(|chunk| {
            let value = match width {
                IndexWidth::U32 => {
                    let mut buf = [0u8; 4];
                    buf.copy_from_slice(chunk);
                    u64::from(u32::from_le_bytes(buf))
                }
                IndexWidth::U64 => {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(chunk);
                    u64::from_le_bytes(buf)
                }
            };
            usize::try_from(value).map_err(|_| SparrowError::InvalidDegrees {
                reason: format!("degree {} does not fit in usize", value),
            })
        })
        .collect()
}

fn parse_ascii(bytes: &[u8]) -> Result<Vec<usize>> {
    let text = std::str::from_utf8(bytes).map_err(|e| SparrowError::InvalidDegrees {
        reason: format!("degree file is not valid text: {}", e),
    })?;

    text.split_ascii_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|e| SparrowError::InvalidDegrees {
                reason: format!("bad degree {:?}: {}", token, e),
            })
        })
        .collect()
}

/// Reads and decodes the degree file at `path`
#[instrument(level = "debug", skip(path, config), fields(path = %path.display()))]
pub fn read_degrees(path: &Path, n_rows: usize, config: &LoadConfig) -> Result<Vec<usize>> {
    let bytes = fs::read(path)?;
    let encoding = detect_encoding(&bytes, n_rows, config);
    debug!(?encoding, len = bytes.len(), "reading degree file");
    parse_degrees(&bytes, n_rows, encoding)
}

/// Reads the degree file next to `matrix_path`, if there is one
pub fn load_side_channel_degrees(
    matrix_path: &Path,
    n_rows: usize,
    config: &LoadConfig,
) -> Result<Option<Vec<usize>>> {
    let path = degrees_path(matrix_path, config);
    match read_degrees(&path, n_rows, config) {
        Ok(degrees) => Ok(Some(degrees)),
        Err(SparrowError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
