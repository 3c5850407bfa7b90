//! Entry selection and column packing.

use std::cmp::Reverse;

use itertools::Itertools;

use sumfiles_core::{GroupMode, StatEntry, Summary};

use crate::ViewOptions;

/// Column width for plain extension/byte output.
pub const NARROW_COLUMN: usize = 35;
/// Column width when date labels or line counts are shown.
pub const WIDE_COLUMN: usize = 45;
/// Entries at or below this many bytes are hidden in byte mode.
pub const MIN_DISPLAY_BYTES: u64 = 1024;

/// Width of the status line outside the root path.
pub(crate) const STATUS_DECORATION: usize = 96;
/// Terminals wider than this get the full status line.
pub(crate) const FULL_STATUS_MIN_COLS: usize = 97;

const ELLIPSIS: &str = "..";

pub fn column_width(opts: &ViewOptions) -> usize {
    if opts.mode == GroupMode::Time || opts.count_lines {
        WIDE_COLUMN
    } else {
        NARROW_COLUMN
    }
}

/// Columns of `width` that fit in `cols`. May be zero.
pub fn column_count(cols: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let mut count = cols / width;
    if count * width > cols {
        count -= 1;
    }
    count
}

/// Whether an entry passes the display threshold.
pub fn is_displayed(entry: &StatEntry, opts: &ViewOptions) -> bool {
    if opts.count_lines {
        entry.line_count > 0
    } else {
        entry.total_bytes > MIN_DISPLAY_BYTES
    }
}

/// Every entry of `summary` in display order, filtered by the display
/// threshold.
///
/// Time mode orders by tier ascending, then label descending so the newest
/// dates come first. Otherwise entries are ordered by bytes (or lines)
/// descending. Ties fall back to label ascending.
pub fn select_entries<'a>(summary: &'a Summary, opts: &ViewOptions) -> Vec<&'a StatEntry> {
    let entries = summary.all_entries().filter(|e| is_displayed(e, opts));

    match summary.mode() {
        GroupMode::Time => entries
            .sorted_by(|a, b| a.group.cmp(&b.group).then_with(|| b.label.cmp(&a.label)))
            .collect(),
        GroupMode::Extension if opts.count_lines => entries
            .sorted_by_key(|e| (Reverse(e.line_count), e.label.clone()))
            .collect(),
        GroupMode::Extension => entries
            .sorted_by_key(|e| (Reverse(e.total_bytes), e.label.clone()))
            .collect(),
    }
}

/// Pack cells column-major into `rows` lines.
///
/// Each column is filled top to bottom before the next starts. Cells
/// beyond the last column are dropped. At least one column is always
/// drawn, even when the terminal is narrower than a cell.
pub fn pack_columns<I>(cells: I, rows: usize, columns: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut lines = vec![String::new(); rows];
    if rows == 0 {
        return lines;
    }
    let capacity = rows * columns.max(1);

    for (idx, cell) in cells.into_iter().take(capacity).enumerate() {
        lines[idx % rows].push_str(&cell);
    }
    lines
}

/// Root path as it fits in a status line of `cols` characters.
///
/// Narrow terminals show the condensed status line, which keeps the full
/// root and relies on truncation. Wider ones cut the path from the left,
/// never shorter than its final segment.
pub fn elide_root(root: &str, cols: usize) -> String {
    let len = root.chars().count();
    if cols <= FULL_STATUS_MIN_COLS || len + STATUS_DECORATION <= cols {
        return root.to_string();
    }

    let last_segment = root
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .map_or(0, |s| s.chars().count() + 1);
    let keep = cols
        .saturating_sub(STATUS_DECORATION + ELLIPSIS.len())
        .max(last_segment)
        .min(len);

    let tail: String = root.chars().skip(len - keep).collect();
    format!("{ELLIPSIS}{tail}")
}
