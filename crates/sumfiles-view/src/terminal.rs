//! Console size discovery.

use tracing::debug;

use sumfiles_core::TermSize;

/// Console size assumed when it cannot be queried.
pub const FALLBACK_SIZE: TermSize = TermSize { cols: 80, rows: 24 };

/// Rows taken by the status line, the spinner, and the shell prompt.
pub const RESERVED_ROWS: u16 = 3;

/// Usable grid size of the attached console.
pub fn detect() -> TermSize {
    let (cols, rows) = match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        Ok(_) => (FALLBACK_SIZE.cols, FALLBACK_SIZE.rows),
        Err(err) => {
            debug!(error = %err, "console size unavailable, using fallback");
            (FALLBACK_SIZE.cols, FALLBACK_SIZE.rows)
        }
    };
    usable(cols, rows)
}

/// Grid size left for entries on a console of `cols` x `rows`.
pub fn usable(cols: u16, rows: u16) -> TermSize {
    TermSize::new(cols, rows.saturating_sub(RESERVED_ROWS).max(1))
}

/// Merge explicit dimensions with the detected console.
///
/// Explicit rows are taken as grid rows and are not reduced.
pub fn resolve(cols: Option<u16>, rows: Option<u16>) -> TermSize {
    match (cols, rows) {
        (Some(cols), Some(rows)) => TermSize::new(cols, rows),
        (cols, rows) => {
            let detected = detect();
            TermSize::new(cols.unwrap_or(detected.cols), rows.unwrap_or(detected.rows))
        }
    }
}
