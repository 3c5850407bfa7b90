//! Text/binary classification gating line counts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

/// Bytes inspected by [`SniffOracle`].
pub const SNIFF_BYTES: usize = 8 * 1024;

/// Decides whether a file is text and should have its lines counted.
pub trait TextOracle {
    fn is_text(&self, path: &Path) -> bool;
}

impl<F> TextOracle for F
where
    F: Fn(&Path) -> bool,
{
    fn is_text(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Classifies by content: text has no NUL bytes and decodes as UTF-8.
///
/// Files that cannot be read are reported as not text.
#[derive(Debug, Clone)]
pub struct SniffOracle {
    sniff_len: usize,
}

impl SniffOracle {
    pub fn new() -> Self {
        Self {
            sniff_len: SNIFF_BYTES,
        }
    }

    /// Inspect at most `len` leading bytes.
    pub fn with_sniff_len(len: usize) -> Self {
        Self {
            sniff_len: len.max(1),
        }
    }
}

impl Default for SniffOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TextOracle for SniffOracle {
    fn is_text(&self, path: &Path) -> bool {
        let mut buf = vec![0u8; self.sniff_len];
        let read = File::open(path).and_then(|mut file| read_head(&mut file, &mut buf));
        match read {
            Ok(n) => looks_like_text(&buf[..n]),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "sniff failed, treating as binary");
                false
            }
        }
    }
}

/// Fill `buf` as far as the reader allows.
fn read_head(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Content test on a leading slice of a file.
///
/// A multi-byte sequence cut off by the end of the slice still counts as text.
pub fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(err) => err.error_len().is_none(),
    }
}
