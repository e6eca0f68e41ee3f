//! Plain-text grid format.
//!
//! One line per row, top row first, one marker character per cell. The writer
//! terminates every row with `'\n'` and appends a blank line. There is no
//! header: the reader is told the grid size and silently truncates or pads
//! input of a different shape.

use crate::grid::Grid;
use life_core::{Cell, FormatConfig, LineDelimiter, Position};
use std::io::{self, BufRead, Write};
use tracing::trace;

/// Read a grid of `width` x `height` cells from `reader`.
///
/// Marker characters fill the current row left to right; characters past
/// `width` are dropped. What ends a row depends on `format.delimiter`:
///
/// - [`LineDelimiter::Newline`]: `'\n'` ends the row, `'\r'` is skipped and
///   any other character is a dead cell.
/// - [`LineDelimiter::AnyNonMarker`]: every non-marker character ends the
///   row, so `"\r\n"` ends two rows.
///
/// Reading stops at end of input or once `height` rows are filled.
pub fn parse_grid<R: BufRead>(
    mut reader: R,
    format: &FormatConfig,
    width: i32,
    height: i32,
) -> io::Result<Grid> {
    let mut grid = Grid::new(width, height);
    let (mut x, mut y) = (0i32, 0i32);
    let mut line = Vec::new();

    while y < height {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        // Invalid UTF-8 decodes to U+FFFD, which is never a marker.
        for ch in String::from_utf8_lossy(&line).chars() {
            let cell = if ch == format.alive {
                Some(Cell::Alive)
            } else if ch == format.dead {
                Some(Cell::Dead)
            } else {
                None
            };

            match (cell, format.delimiter) {
                (Some(cell), _) => {
                    if x < width {
                        let index = grid.pos_to_index(Position::new(x, y));
                        grid.set_index(index, cell);
                    }
                    x = x.saturating_add(1);
                }
                (None, LineDelimiter::Newline) => match ch {
                    '\n' => {
                        x = 0;
                        y += 1;
                    }
                    '\r' => {}
                    _ => x = x.saturating_add(1),
                },
                (None, LineDelimiter::AnyNonMarker) => {
                    x = 0;
                    y += 1;
                }
            }

            if y >= height {
                break;
            }
        }
    }

    trace!(rows_read = y, population = grid.population(), "Parsed grid text");
    Ok(grid)
}

/// Write `grid` in the textual format
pub fn write_grid<W: Write>(mut writer: W, grid: &Grid, format: &FormatConfig) -> io::Result<()> {
    writer.write_all(to_text(grid, format).as_bytes())?;
    writer.flush()
}

/// Textual form of `grid`, including the trailing blank line
pub fn to_text(grid: &Grid, format: &FormatConfig) -> String {
    let mut text = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize + 1);
    push_rows(&mut text, grid, format);
    text.push('\n');
    text
}

/// Append one line per row, without the trailing blank line
pub fn push_rows(out: &mut String, grid: &Grid, format: &FormatConfig) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(format.marker(grid.get(Position::new(x, y)).is_alive()));
        }
        out.push('\n');
    }
}
