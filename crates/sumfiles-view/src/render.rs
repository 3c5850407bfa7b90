//! Live frame rendering.

use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Local, TimeZone};
use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use sumfiles_core::{Summary, TermSize};

use crate::ViewOptions;
use crate::format::{
    TIMESTAMP_FORMAT, fit_cell, format_date_in, format_entry, human_size, truncate_chars,
};
use crate::layout::{
    FULL_STATUS_MIN_COLS, column_count, column_width, pack_columns, select_entries,
};

/// Activity glyphs, one per frame.
pub const SPINNER: [char; 4] = ['\u{2832}', '\u{2834}', '\u{2826}', '\u{2816}'];

/// One rendered snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub status: String,
    pub spinner: char,
    /// Grid lines, always as many as the terminal has rows.
    pub rows: Vec<String>,
}

impl Frame {
    /// All lines in output order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        [self.status.clone(), self.spinner.to_string()]
            .into_iter()
            .chain(self.rows.iter().cloned())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Projects a summary onto the terminal.
///
/// Holds only the spinner position and whether the screen was cleared yet.
#[derive(Debug)]
pub struct Renderer {
    opts: ViewOptions,
    tick: usize,
    cleared: bool,
}

impl Renderer {
    pub fn new(opts: ViewOptions) -> Self {
        Self {
            opts,
            tick: 0,
            cleared: false,
        }
    }

    pub fn options(&self) -> &ViewOptions {
        &self.opts
    }

    /// Number of frames rendered so far.
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Render a frame stamped with the current local time.
    pub fn render(&mut self, summary: &Summary, size: TermSize) -> Frame {
        self.render_at(summary, size, &Local::now())
    }

    /// Render a frame stamped with `now`.
    pub fn render_at<Tz: TimeZone>(
        &mut self,
        summary: &Summary,
        size: TermSize,
        now: &DateTime<Tz>,
    ) -> Frame
    where
        Tz::Offset: fmt::Display,
    {
        let cols = usize::from(size.cols);
        let rows = usize::from(size.rows);
        let width = column_width(&self.opts);
        let columns = column_count(cols, width);

        let entries = select_entries(summary, &self.opts);
        if self.opts.debug {
            debug!(
                displayed = entries.len(),
                total = summary.total,
                columns,
                rows,
                "rendering frame"
            );
        }
        let cells = entries
            .iter()
            .map(|entry| fit_cell(&format_entry(entry, &self.opts), width));

        let spinner = SPINNER[self.tick % SPINNER.len()];
        self.tick = self.tick.wrapping_add(1);

        Frame {
            status: status_line(summary, cols, now),
            spinner,
            rows: pack_columns(cells, rows, columns),
        }
    }

    /// Render and write a frame.
    ///
    /// The first frame clears the screen. Later frames home the cursor and
    /// overwrite in place, except in debug mode where output scrolls.
    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        summary: &Summary,
        size: TermSize,
    ) -> io::Result<()> {
        let frame = self.render(summary, size);
        self.write_frame(out, &frame)
    }

    pub fn write_frame<W: Write>(&mut self, out: &mut W, frame: &Frame) -> io::Result<()> {
        if !self.cleared {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            self.cleared = true;
        } else if !self.opts.debug {
            queue!(out, MoveTo(0, 0))?;
        }
        for line in frame.lines() {
            queue!(out, Print(line), Clear(ClearType::UntilNewLine), Print("\n"))?;
        }
        out.flush()
    }
}

/// Header line with time, root, date range, scanned bytes, and errors.
///
/// The date range is left out on terminals too narrow for it, and the
/// line is cut to `cols` characters.
pub fn status_line<Tz: TimeZone>(summary: &Summary, cols: usize, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    let tz = now.timezone();
    let line = if cols > FULL_STATUS_MIN_COLS {
        format!(
            "{stamp:>18} {} {:>11}: {:>11} {:>11}: {:>11} scanned: {:>6} errs: {:>3}",
            summary.root_display,
            "min-mtime",
            format_date_in(summary.min_mod_time, &tz),
            "max-mtime",
            format_date_in(summary.max_mod_time, &tz),
            human_size(summary.total),
            summary.exception_count
        )
    } else {
        format!(
            "{stamp:>18} {} scanned: {:>6} errs: {:>3}",
            summary.root_display,
            human_size(summary.total),
            summary.exception_count
        )
    };
    truncate_chars(&line, cols)
}
