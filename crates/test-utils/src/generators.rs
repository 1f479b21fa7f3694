//! Deterministic grid-file generators.
//!
//! Generated offsets follow a predictable formula so tests can verify
//! that a value read back from cell `(col, row)` is the one that was
//! written for that cell.

use crate::fixtures::{data_line, grid_header};

/// The offsets written for cell `(col, row)` by the generators below:
/// `tX = col * 1000 + row`, `tY = tX / 2`, `tZ = -tX`.
pub fn offsets_for_cell(col: usize, row: usize) -> (f64, f64, f64) {
    let tx = (col * 1000 + row) as f64;
    (tx, tx / 2.0, -tx)
}

/// A complete grid file: header plus one data line for every cell.
pub fn full_grid_text(x0: f64, y0: f64, x1: f64, y1: f64, dx: f64, dy: f64) -> String {
    let columns = ((x1 - x0) / dx + 1.0).round() as usize;
    let rows = ((y1 - y0) / dy + 1.0).round() as usize;
    let mut text = grid_header(x0, y0, x1, y1, dx, dy);
    let mut seq = 1;
    for col in 0..columns {
        for row in 0..rows {
            let (tx, ty, tz) = offsets_for_cell(col, row);
            text.push_str(&data_line(
                seq,
                x0 + col as f64 * dx,
                y0 + row as f64 * dy,
                tx,
                ty,
                tz,
            ));
            seq += 1;
        }
    }
    text
}

/// A grid file covering only some cells; the rest stay undefined.
pub fn sparse_grid_text(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    dx: f64,
    dy: f64,
    cells: &[(usize, usize)],
) -> String {
    let mut text = grid_header(x0, y0, x1, y1, dx, dy);
    for (seq, &(col, row)) in cells.iter().enumerate() {
        let (tx, ty, tz) = offsets_for_cell(col, row);
        text.push_str(&data_line(
            (seq + 1) as u32,
            x0 + col as f64 * dx,
            y0 + row as f64 * dy,
            tx,
            ty,
            tz,
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grid_line_count() {
        let text = full_grid_text(0.0, 0.0, 1.0, 1.0, 0.5, 0.5);
        // 4 header lines + 9 data lines for the 3x3 grid.
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_offsets_deterministic() {
        assert_eq!(offsets_for_cell(2, 1), (2001.0, 1000.5, -2001.0));
    }
}
