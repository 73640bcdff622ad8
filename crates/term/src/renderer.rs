//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! written. A size change or [`TerminalRenderer::invalidate`] forces a full
//! redraw.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Force the next draw to be a full redraw (e.g. on resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. After the call
    /// `fb` holds the previous frame and can be overwritten.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf).context("write frame")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching the terminal.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let rows = (0..fb.height()).map(|y| (0, y, fb.width()));
    encode_runs_into(fb, rows, out)
}

/// Encode only the runs of cells that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    encode_runs_into(next, changed_runs(prev, next), out)
}

fn encode_runs_into(
    fb: &FrameBuffer,
    runs: impl IntoIterator<Item = (u16, u16, u16)>,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in runs {
        out.queue(cursor::MoveTo(x, y))?;
        for cell in (x..x.saturating_add(len)).filter_map(|cx| fb.get(cx, y)) {
            pen.switch(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(())
}

/// Tracks the terminal's current style so only the parts that change are sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn switch(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // `Attribute::Reset` also drops both colors, so they are re-sent after it.
        let reset = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if reset {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if reset || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if reset || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        Ok(())
    }
}

fn rgb_to_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// `(x, y, len)` for every horizontal run of changed cells. Both buffers must
/// have the same size; a mismatch reports every row as one run.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}
