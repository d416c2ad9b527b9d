//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full redraw; later
//! frames only rewrite the horizontal runs of cells that changed since the previous one.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Raw mode and the alternate screen are active.
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            entered: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.last = None;

        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previously drawn frame.
    ///
    /// On return `fb` holds stale contents the caller is expected to overwrite; keeping
    /// both buffers alive lets every frame diff without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev =
                    stale.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
                prev.resize(fb.width(), fb.height());
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Covers early returns that skipped `exit`.
        let _ = self.exit();
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = StylePen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_run(fb, 0, y, fb.width(), &mut pen, out)?;
    }
    pen.reset(out)
}

/// Encode only the cells that differ between `prev` and `next`.
///
/// Both frames must have the same size; callers fall back to [`encode_full_into`] otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = StylePen::default();
    for run in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        write_run(next, run.x, run.y, run.len, &mut pen, out)?;
    }
    pen.reset(out)
}

fn write_run(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    pen: &mut StylePen,
    out: &mut Vec<u8>,
) -> Result<()> {
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        pen.apply(cell.style, out)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Remembers the terminal's current style so unchanged attributes are not re-sent.
#[derive(Default)]
struct StylePen {
    current: Option<CellStyle>,
}

impl StylePen {
    fn apply(&mut self, style: CellStyle, out: &mut Vec<u8>) -> Result<()> {
        let prev = match self.current {
            Some(prev) if prev == style => return Ok(()),
            other => other,
        };

        let attrs_changed = prev.map_or(true, |p| (p.bold, p.dim) != (style.bold, style.dim));
        if attrs_changed {
            // Resetting attributes also resets colors on most terminals.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map_or(true, |p| p.fg != style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.map_or(true, |p| p.bg != style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }

        self.current = Some(style);
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.current = None;
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal stretch of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Iterates maximal runs of differing cells, row by row, left to right.
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (w, h) = (self.next.width(), self.next.height());
        while self.y < h {
            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn put(fb: &mut FrameBuffer, x: u16, y: u16, ch: char) {
        fb.set(
            x,
            y,
            Cell {
                ch,
                style: CellStyle::default(),
            },
        );
    }

    #[test]
    fn full_encode_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        put(&mut fb, 0, 0, 'A');
        put(&mut fb, 1, 0, 'B');
        put(&mut fb, 0, 1, 'C');
        put(&mut fb, 1, 1, 'D');

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB"), "{text:?}");
        assert!(text.contains("CD"), "{text:?}");
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(5, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            put(&mut b, x, 0, 'X');
        }
        put(&mut b, 0, 1, 'Y');
        put(&mut b, 4, 1, 'Z');

        let runs: Vec<Run> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(
            runs,
            vec![
                Run { x: 1, y: 0, len: 3 },
                Run { x: 0, y: 1, len: 1 },
                Run { x: 4, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(4, 3);
        assert_eq!(ChangedRuns::new(&a, &a).count(), 0);

        let mut out = Vec::new();
        encode_diff_into(&a, &a, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains(' '));
    }

    #[test]
    fn pen_skips_repeated_styles() {
        let mut pen = StylePen::default();
        let mut out = Vec::new();
        pen.apply(CellStyle::default(), &mut out).unwrap();
        let first = out.len();
        assert!(first > 0);

        pen.apply(CellStyle::default(), &mut out).unwrap();
        assert_eq!(out.len(), first);

        let orange = CellStyle {
            fg: Rgb::ORANGE,
            ..CellStyle::default()
        };
        pen.apply(orange, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out[first..]);
        assert!(text.contains("38;2;255;165;0"), "{text:?}");
        assert_eq!(
            rgb_to_color(Rgb::ORANGE),
            Color::Rgb {
                r: 255,
                g: 165,
                b: 0
            }
        );
    }
}
