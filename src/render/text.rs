use super::Renderer;
use crate::error::Result;
use crate::grid::Grid;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, stdout, IsTerminal, Stdout, Write};

/// Render a row-major cell sequence: `glyph` for live cells, a blank for dead
/// ones, a newline between rows and none after the last.
pub fn format_frame(cells: &[u8], cols: usize, glyph: char) -> String {
    let mut frame = String::with_capacity(cells.len() + cells.len() / cols.max(1));
    for (i, row) in cells.chunks(cols).enumerate() {
        if i > 0 {
            frame.push('\n');
        }
        frame.extend(row.iter().map(|&c| if c != 0 { glyph } else { ' ' }));
    }
    frame
}

/// Pick the text grid size as (rows, cols).
///
/// Explicit rows/cols win, then the queried terminal size (crossterm reports
/// columns first), then the configured fallback.
pub fn resolve_size(
    requested: (Option<u16>, Option<u16>),
    queried: io::Result<(u16, u16)>,
    fallback: (u16, u16),
) -> (usize, usize) {
    let (rows, cols) = match requested {
        (Some(rows), Some(cols)) => (rows, cols),
        (rows, cols) => {
            let (term_rows, term_cols) = match queried {
                Ok((w, h)) => (h, w),
                Err(err) => {
                    log::warn!(
                        "cannot query terminal size ({err}), using {}x{}",
                        fallback.0,
                        fallback.1
                    );
                    fallback
                }
            };
            (rows.unwrap_or(term_rows), cols.unwrap_or(term_cols))
        }
    };
    (rows as usize, cols as usize)
}

/// Prints each generation as characters.
///
/// On an interactive terminal the screen is cleared once and every frame is
/// drawn over the previous one from the home position; otherwise frames are
/// separated by a single newline. Cursor visibility is never changed, so an
/// interrupted run needs no cleanup.
pub struct TextRenderer<W: Write> {
    out: W,
    glyph: char,
    interactive: bool,
    frames: u64,
}

impl TextRenderer<Stdout> {
    pub fn stdout(glyph: char) -> io::Result<Self> {
        let out = stdout();
        let interactive = out.is_terminal();
        Self::new(out, glyph, interactive)
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(mut out: W, glyph: char, interactive: bool) -> io::Result<Self> {
        if interactive {
            execute!(out, Clear(ClearType::All))?;
        }
        Ok(Self {
            out,
            glyph,
            interactive,
            frames: 0,
        })
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn draw(&mut self, grid: &Grid) -> Result<()> {
        if self.interactive {
            queue!(self.out, MoveTo(0, 0))?;
        } else if self.frames > 0 {
            self.out.write_all(b"\n")?;
        }
        let frame = format_frame(grid.cells(), grid.cols(), self.glyph);
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(r: &TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.get_ref().clone()).unwrap()
    }

    #[test]
    fn frame_has_separators_between_rows_only() {
        let cells = [1, 0, 1, 0, 1, 0];
        assert_eq!(format_frame(&cells, 3, 'O'), "O O\n O ");
    }

    #[test]
    fn single_row_frame_has_no_newline() {
        assert_eq!(format_frame(&[0, 1, 1], 3, '#'), " ##");
    }

    #[test]
    fn plain_output_separates_frames() {
        let mut r = TextRenderer::new(Vec::new(), 'O', false).unwrap();
        let mut g = Grid::new(2, 2);
        r.draw(&g).unwrap();
        g.set(1, 1, 1);
        r.draw(&g).unwrap();
        assert_eq!(output(&r), "  \n  \n  \n O");
    }

    #[test]
    fn interactive_output_homes_cursor_each_frame() {
        let mut r = TextRenderer::new(Vec::new(), 'O', true).unwrap();
        let g = Grid::from_cells(1, 2, vec![1, 1]);
        r.draw(&g).unwrap();
        r.draw(&g).unwrap();
        let out = output(&r);
        assert!(out.starts_with("\x1b[2J"));
        assert_eq!(out.matches("\x1b[1;1HOO").count(), 2);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn interactive_output_never_touches_cursor_visibility() {
        let mut r = TextRenderer::new(Vec::new(), 'O', true).unwrap();
        r.draw(&Grid::from_cells(2, 2, vec![1, 0, 0, 1])).unwrap();
        let out = output(&r);
        assert!(!out.contains("\x1b[?25l"), "cursor hidden: {out:?}");
        assert!(!out.contains("\x1b[?25h"), "cursor shown: {out:?}");
    }

    #[test]
    fn explicit_size_skips_query() {
        let size = resolve_size((Some(3), Some(4)), Err(io::Error::other("no tty")), (24, 80));
        assert_eq!(size, (3, 4));
    }

    #[test]
    fn queried_size_is_columns_first() {
        let size = resolve_size((None, None), Ok((120, 40)), (24, 80));
        assert_eq!(size, (40, 120));
        let size = resolve_size((Some(10), None), Ok((120, 40)), (24, 80));
        assert_eq!(size, (10, 120));
    }

    #[test]
    fn failed_query_uses_fallback() {
        let size = resolve_size((None, Some(5)), Err(io::Error::other("no tty")), (24, 80));
        assert_eq!(size, (24, 5));
    }
}
