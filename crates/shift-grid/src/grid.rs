//! Datum shift grid: header parsing, data loading, and cell lookup.
//!
//! The grid file is plain text. Header lines start with a fixed
//! four-character keyword; the line suffixed `1` declares the grid
//! geometry as six numbers and the line suffixed `2` declares the
//! interpolation method used to produce the grid:
//!
//! ```text
//! GR3D  002024 024 20370201
//! GR3D1   -5.5000  10.0000  41.0000  52.0000    .1000    .1000
//! GR3D2 INTERPOLATION BILINEAIRE
//! GR3D3 PREC CM 01:5 02:10 03:20 04:50 99>100
//! ```
//!
//! Every following line is a data line carrying a sequence id, a
//! longitude, a latitude, and three geocentric translation components
//! (trailing accuracy and sheet columns are ignored):
//!
//! ```text
//! 00002   -5.500000000   41.000000000  -165.027   -67.100   315.813  99  -0158
//! ```

use crate::error::{GridError, Result};
use numeric_vector::Vector;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The keyword expected at the beginning of every header line.
pub const HEADER_KEYWORD: &str = "GR3D";

/// Number of offset components stored per grid cell (tX, tY, tZ).
pub const OFFSET_DIMENSIONS: usize = 3;

/// Grid geometry declared by the header: extents and spacing along both
/// grid axes. Spacing may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub dx: f64,
    pub dy: f64,
}

impl GridGeometry {
    /// Number of cells between `min` and `max` with the given spacing,
    /// or `None` when the division does not round to a usable count.
    fn cell_count(min: f64, max: f64, step: f64) -> Option<usize> {
        let count = ((max - min) / step + 1.0).round();
        if count.is_finite() && count >= 1.0 && count <= i32::MAX as f64 {
            Some(count as usize)
        } else {
            None
        }
    }
}

/// A loaded datum shift grid: a regularly spaced 2-D table of
/// geocentric translation vectors.
///
/// Construction goes through [`ShiftGrid::from_file`] or
/// [`ShiftGrid::from_reader`], which parse the header (geometry must be
/// known before storage is allocated) and then consume every data line.
/// Cells never written by a data line stay NaN, meaning "no correction
/// available"; queries on them return NaN rather than failing.
#[derive(Debug)]
pub struct ShiftGrid {
    x0: f64,
    y0: f64,
    dx: f64,
    dy: f64,
    scale_x: f64,
    scale_y: f64,
    nx: usize,
    ny: usize,
    /// One dense NaN-initialized value array per offset dimension,
    /// row-major by `(x, y) -> j * nx + i`.
    offsets: [Vector; OFFSET_DIMENSIONS],
}

impl ShiftGrid {
    /// Load a grid from a file on disk.
    pub fn from_file(path: &Path) -> Result<ShiftGrid> {
        let file = File::open(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Load a grid from a buffered reader. `path` is used only for
    /// error reporting.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<ShiftGrid> {
        let mut lines = reader.lines();
        let mut line_number: u64 = 0;
        let mut geometry: Option<GridGeometry> = None;
        let pending: (u64, String);
        loop {
            let line = match lines.next() {
                Some(read) => read.map_err(|source| GridError::Io {
                    path: path.to_path_buf(),
                    source,
                })?,
                None => {
                    return Err(GridError::UnexpectedEof {
                        path: path.to_path_buf(),
                    })
                }
            };
            line_number += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !has_header_keyword(trimmed) {
                // End of the metadata block: this line is the first
                // data line and must not be lost.
                pending = (line_number, line);
                break;
            }
            let rest = &trimmed[HEADER_KEYWORD.len()..];
            let mut chars = rest.chars();
            match chars.next() {
                Some('1') => {
                    geometry = Some(parse_geometry(chars.as_str(), path)?);
                }
                Some('2') => {
                    let declaration = chars.as_str().trim();
                    if !is_bilinear_declaration(declaration) {
                        tracing::warn!(
                            file = %path.display(),
                            declaration,
                            "unsupported interpolation method declared; assuming bilinear"
                        );
                    }
                }
                _ => {}
            }
        }
        let geometry = geometry.ok_or_else(|| GridError::MalformedHeader {
            path: path.to_path_buf(),
        })?;
        let mut grid = ShiftGrid::with_geometry(geometry, path)?;
        let (number, line) = pending;
        grid.load_line(&line, number, path)?;
        for read in lines {
            let line = read.map_err(|source| GridError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            line_number += 1;
            grid.load_line(&line, line_number, path)?;
        }
        Ok(grid)
    }

    /// Allocate the NaN-initialized offset storage for a parsed
    /// geometry.
    fn with_geometry(geometry: GridGeometry, path: &Path) -> Result<ShiftGrid> {
        let nx = GridGeometry::cell_count(geometry.x0, geometry.x1, geometry.dx).ok_or(
            GridError::InvalidGeometry {
                path: path.to_path_buf(),
                axis: 'x',
                min: geometry.x0,
                max: geometry.x1,
                step: geometry.dx,
            },
        )?;
        let ny = GridGeometry::cell_count(geometry.y0, geometry.y1, geometry.dy).ok_or(
            GridError::InvalidGeometry {
                path: path.to_path_buf(),
                axis: 'y',
                min: geometry.y0,
                max: geometry.y1,
                step: geometry.dy,
            },
        )?;
        let size = nx.checked_mul(ny).ok_or(GridError::GridTooLarge {
            path: path.to_path_buf(),
            nx,
            ny,
        })?;
        let offsets =
            [(); OFFSET_DIMENSIONS].map(|_| Vector::create(vec![f32::NAN; size], false));
        Ok(ShiftGrid {
            x0: geometry.x0,
            y0: geometry.y0,
            dx: geometry.dx,
            dy: geometry.dy,
            scale_x: 1.0 / geometry.dx,
            scale_y: 1.0 / geometry.dy,
            nx,
            ny,
            offsets,
        })
    }

    /// Consume one data line. Columns are: sequence id (ignored),
    /// longitude, latitude, tX, tY, tZ; extra trailing tokens are
    /// ignored.
    fn load_line(&mut self, line: &str, number: u64, path: &Path) -> Result<()> {
        let mut tokens = line.split_whitespace();
        let _sequence: i64 = parse_token(next_token(&mut tokens, path, number)?, path, number)?;
        let x: f64 = parse_token(next_token(&mut tokens, path, number)?, path, number)?;
        let y: f64 = parse_token(next_token(&mut tokens, path, number)?, path, number)?;
        let i = self.column_index(x).ok_or(GridError::ValueOutOfRange {
            path: path.to_path_buf(),
            axis: 'x',
            value: x,
            min: self.x0,
            max: self.x0 + self.nx as f64 / self.scale_x,
        })?;
        let j = self.row_index(y).ok_or(GridError::ValueOutOfRange {
            path: path.to_path_buf(),
            axis: 'y',
            value: y,
            min: self.y0,
            max: self.y0 + self.ny as f64 / self.scale_y,
        })?;
        let cell = j * self.nx + i;
        if self.offsets.iter().any(|dim| !dim.is_nan(cell)) {
            return Err(GridError::DuplicateCell {
                path: path.to_path_buf(),
                x,
                y,
            });
        }
        for dim in 0..OFFSET_DIMENSIONS {
            let value: f64 = parse_token(next_token(&mut tokens, path, number)?, path, number)?;
            self.offsets[dim].set(cell, value)?;
        }
        Ok(())
    }

    /// Nearest column index for a longitude, or `None` if outside the
    /// grid.
    fn column_index(&self, x: f64) -> Option<usize> {
        let index = ((x - self.x0) * self.scale_x).round();
        if index >= 0.0 && index < self.nx as f64 {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Nearest row index for a latitude, or `None` if outside the grid.
    fn row_index(&self, y: f64) -> Option<usize> {
        let index = ((y - self.y0) * self.scale_y).round();
        if index >= 0.0 && index < self.ny as f64 {
            Some(index as usize)
        } else {
            None
        }
    }

    /// The offset component `dim` at grid cell `(i, j)`.
    ///
    /// No bounds adjustment is performed: callers must supply in-range
    /// indices, normally from the same index computation used during
    /// loading. Undefined cells return NaN.
    ///
    /// # Panics
    /// Panics if `dim`, `i` or `j` is out of range.
    pub fn cell_value(&self, dim: usize, i: usize, j: usize) -> f64 {
        self.offsets[dim].f64_value(j * self.nx + i)
    }

    /// Whether the cell `(i, j)` received a value during loading.
    pub fn is_cell_defined(&self, i: usize, j: usize) -> bool {
        let cell = j * self.nx + i;
        self.offsets.iter().any(|dim| !dim.is_nan(cell))
    }

    /// Bilinear interpolation of all offset components at the given
    /// coordinates, expressed in the same units as the grid geometry.
    ///
    /// Returns NaN components when the point falls outside the grid or
    /// when a neighboring cell is undefined.
    pub fn interpolate(&self, x: f64, y: f64) -> [f64; OFFSET_DIMENSIONS] {
        let gx = (x - self.x0) * self.scale_x;
        let gy = (y - self.y0) * self.scale_y;
        if !(gx >= 0.0 && gx <= (self.nx - 1) as f64 && gy >= 0.0 && gy <= (self.ny - 1) as f64) {
            return [f64::NAN; OFFSET_DIMENSIONS];
        }
        let col = gx.floor() as usize;
        let row = gy.floor() as usize;
        let col_next = (col + 1).min(self.nx - 1);
        let row_next = (row + 1).min(self.ny - 1);
        let xf = gx - col as f64;
        let yf = gy - row as f64;
        let mut out = [f64::NAN; OFFSET_DIMENSIONS];
        for (dim, value) in out.iter_mut().enumerate() {
            let v00 = self.cell_value(dim, col, row);
            let v10 = self.cell_value(dim, col_next, row);
            let v01 = self.cell_value(dim, col, row_next);
            let v11 = self.cell_value(dim, col_next, row_next);
            let top = v00 * (1.0 - xf) + v10 * xf;
            let bottom = v01 * (1.0 - xf) + v11 * xf;
            *value = top * (1.0 - yf) + bottom * yf;
        }
        out
    }

    /// Origin coordinate of cell (0, 0) along the x axis.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Origin coordinate of cell (0, 0) along the y axis.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Cell spacing along the x axis.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell spacing along the y axis.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Inverse of the x spacing, as used by the index computation.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Inverse of the y spacing, as used by the index computation.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Number of columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn has_header_keyword(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= HEADER_KEYWORD.len()
        && bytes[..HEADER_KEYWORD.len()].eq_ignore_ascii_case(HEADER_KEYWORD.as_bytes())
}

/// Parse the six numbers of the geometry header line.
fn parse_geometry(fields: &str, path: &Path) -> Result<GridGeometry> {
    let mut numbers = [0.0_f64; 6];
    let mut count = 0;
    for token in fields.split_whitespace() {
        if count == numbers.len() {
            count += 1;
            break;
        }
        numbers[count] = token.parse().map_err(|_| GridError::MalformedHeader {
            path: path.to_path_buf(),
        })?;
        count += 1;
    }
    if count != numbers.len() {
        return Err(GridError::MalformedHeader {
            path: path.to_path_buf(),
        });
    }
    Ok(GridGeometry {
        x0: numbers[0],
        y0: numbers[1],
        x1: numbers[2],
        y1: numbers[3],
        dx: numbers[4],
        dy: numbers[5],
    })
}

/// Whether a header declaration names the bilinear interpolation this
/// engine implements (the original file format spells it
/// "INTERPOLATION BILINEAIRE").
fn is_bilinear_declaration(declaration: &str) -> bool {
    let upper = declaration.to_ascii_uppercase();
    let rest = match upper.strip_prefix("INTERPOLATION") {
        Some(rest) => rest,
        None => return false,
    };
    match rest.chars().next() {
        Some(c) if !c.is_ascii_uppercase() => {}
        _ => return false,
    }
    let method = rest.trim_start_matches(|c: char| !c.is_ascii_uppercase());
    method == "BILINEAIRE" || method == "BILINEAR"
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    path: &Path,
    line: u64,
) -> Result<&'a str> {
    tokens.next().ok_or(GridError::TruncatedLine {
        path: path.to_path_buf(),
        line,
    })
}

fn parse_token<T: std::str::FromStr>(token: &str, path: &Path, line: u64) -> Result<T> {
    token.parse().map_err(|_| GridError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}
