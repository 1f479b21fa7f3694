//! Common grid-file fixtures for tests.
//!
//! These helpers build datum shift grid files in the text format the
//! loader consumes: keyword-prefixed header lines followed by
//! whitespace-tokenized data lines.

use std::fs;
use std::path::{Path, PathBuf};

/// Geometry of the small unit grid used across the test suite:
/// a 3x3 grid covering [0, 1] x [0, 1] with 0.5 spacing.
pub const UNIT_GRID: (f64, f64, f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0, 0.5, 0.5);

/// Header lines for a grid with the given geometry, declaring bilinear
/// interpolation.
pub fn grid_header(x0: f64, y0: f64, x1: f64, y1: f64, dx: f64, dy: f64) -> String {
    format!(
        "GR3D  000001 001 19970101\n\
         GR3D1  {x0:10.4} {y0:10.4} {x1:10.4} {y1:10.4} {dx:8.4} {dy:8.4}\n\
         GR3D2 INTERPOLATION BILINEAIRE\n\
         GR3D3 PREC CM 01:5 02:10 03:20 04:50 99>100\n"
    )
}

/// Header lines for the unit grid.
pub fn unit_grid_header() -> String {
    let (x0, y0, x1, y1, dx, dy) = UNIT_GRID;
    grid_header(x0, y0, x1, y1, dx, dy)
}

/// One data line: sequence id, longitude, latitude, three offsets, and
/// the trailing accuracy/sheet columns the loader ignores.
pub fn data_line(seq: u32, lon: f64, lat: f64, tx: f64, ty: f64, tz: f64) -> String {
    format!(
        "{seq:05}  {lon:13.9}  {lat:13.9}  {tx:9.3} {ty:9.3} {tz:9.3}  99  -0158\n"
    )
}

/// Write grid file contents under the given directory and return the
/// file path.
pub fn write_grid_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write grid fixture");
    path
}
