//! Newline counting.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use sumfiles_core::ScanError;

use crate::oracle::TextOracle;

const BUF_SIZE: usize = 32 * 1024;

/// Count `\n` bytes in a stream.
///
/// A final line without a trailing newline is not counted.
pub fn count_newlines(mut reader: impl Read) -> std::io::Result<u64> {
    let mut buf = vec![0u8; BUF_SIZE];
    let mut count = 0u64;
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(count),
            Ok(n) => count += buf[..n].iter().filter(|&&b| b == b'\n').count() as u64,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Count newline bytes of the file at `path`.
pub fn count_file_lines(path: &Path) -> Result<u64, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::line_count(path, e))?;
    let lines = count_newlines(file).map_err(|e| ScanError::line_count(path, e))?;
    debug!(path = %path.display(), lines, "counted lines");
    Ok(lines)
}

/// Lines of `path` if the oracle says it is text, otherwise zero.
pub fn maybe_count_lines<O>(oracle: &O, path: &Path) -> Result<u64, ScanError>
where
    O: TextOracle + ?Sized,
{
    if !oracle.is_text(path) {
        return Ok(0);
    }
    count_file_lines(path)
}
