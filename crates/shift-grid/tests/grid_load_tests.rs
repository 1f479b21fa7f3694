//! Loading, lookup, and caching of datum shift grids.

use shift_grid::{GeocentricTranslation, GridCache, GridError, GridSettings, ShiftGrid};
use std::path::Path;
use std::sync::Arc;
use test_utils::{
    data_line, full_grid_text, offsets_for_cell, sparse_grid_text, unit_grid_header,
    write_grid_file, UNIT_GRID,
};

fn load(text: &str) -> Result<ShiftGrid, GridError> {
    ShiftGrid::from_reader(text.as_bytes(), Path::new("test_grid.txt"))
}

fn unit_grid_text() -> String {
    let (x0, y0, x1, y1, dx, dy) = UNIT_GRID;
    full_grid_text(x0, y0, x1, y1, dx, dy)
}

#[test]
fn load_and_query_full_grid() {
    let grid = load(&unit_grid_text()).unwrap();
    assert_eq!(grid.nx(), 3);
    assert_eq!(grid.ny(), 3);
    assert_eq!(grid.x0(), 0.0);
    assert_eq!(grid.dy(), 0.5);
    assert_eq!(grid.len(), 9);
    for col in 0..3 {
        for row in 0..3 {
            let (tx, ty, tz) = offsets_for_cell(col, row);
            assert_eq!(grid.cell_value(0, col, row), tx);
            assert_eq!(grid.cell_value(1, col, row), ty);
            assert_eq!(grid.cell_value(2, col, row), tz);
        }
    }
}

#[test]
fn single_cell_leaves_others_undefined() {
    let mut text = unit_grid_header();
    text.push_str(&data_line(1, 0.0, 0.0, -165.027, -67.1, 315.813));
    let grid = load(&text).unwrap();
    assert_eq!(grid.cell_value(0, 0, 0) as f32, -165.027_f32);
    assert!(grid.is_cell_defined(0, 0));
    assert!(!grid.is_cell_defined(1, 1));
    assert!(grid.cell_value(0, 1, 1).is_nan());
    assert!(grid.cell_value(2, 2, 2).is_nan());
}

#[test]
fn duplicate_cell_is_rejected() {
    let mut text = unit_grid_header();
    text.push_str(&data_line(1, 0.5, 0.5, 1.0, 2.0, 3.0));
    text.push_str(&data_line(2, 0.5, 0.5, 4.0, 5.0, 6.0));
    let error = load(&text).unwrap_err();
    match error {
        GridError::DuplicateCell { x, y, .. } => {
            assert_eq!(x, 0.5);
            assert_eq!(y, 0.5);
        }
        other => panic!("expected DuplicateCell, got {other}"),
    }
}

#[test]
fn out_of_range_coordinate_is_rejected() {
    let mut text = unit_grid_header();
    text.push_str(&data_line(1, 2.0, 0.0, 1.0, 2.0, 3.0));
    let error = load(&text).unwrap_err();
    match error {
        GridError::ValueOutOfRange {
            axis, value, min, ..
        } => {
            assert_eq!(axis, 'x');
            assert_eq!(value, 2.0);
            assert_eq!(min, 0.0);
        }
        other => panic!("expected ValueOutOfRange, got {other}"),
    }
}

#[test]
fn missing_geometry_line_is_fatal() {
    let text = "GR3D  000001 001 19970101\n\
                GR3D2 INTERPOLATION BILINEAIRE\n\
                00001 0.0 0.0 1.0 2.0 3.0\n";
    assert!(matches!(
        load(text),
        Err(GridError::MalformedHeader { .. })
    ));
}

#[test]
fn wrong_geometry_field_count_is_fatal() {
    let text = "GR3D1 0.0 0.0 1.0 1.0 0.5\n00001 0.0 0.0 1.0 2.0 3.0\n";
    assert!(matches!(
        load(text),
        Err(GridError::MalformedHeader { .. })
    ));
}

#[test]
fn end_of_stream_inside_header_is_fatal() {
    assert!(matches!(load(""), Err(GridError::UnexpectedEof { .. })));
    // A header with no data lines never leaves the metadata block.
    assert!(matches!(
        load(&unit_grid_header()),
        Err(GridError::UnexpectedEof { .. })
    ));
}

#[test]
fn truncated_data_line_is_fatal() {
    let mut text = unit_grid_header();
    text.push_str("00001   0.000000000   0.000000000  -165.027\n");
    assert!(matches!(
        load(&text),
        Err(GridError::TruncatedLine { line: 5, .. })
    ));
}

#[test]
fn non_numeric_token_is_fatal() {
    let mut text = unit_grid_header();
    text.push_str("00001   zero   0.000000000  1.0 2.0 3.0\n");
    match load(&text).unwrap_err() {
        GridError::InvalidNumber { token, .. } => assert_eq!(token, "zero"),
        other => panic!("expected InvalidNumber, got {other}"),
    }
}

#[test]
fn unsupported_interpolation_still_loads() {
    let (x0, y0, x1, y1, dx, dy) = UNIT_GRID;
    let text = full_grid_text(x0, y0, x1, y1, dx, dy)
        .replace("INTERPOLATION BILINEAIRE", "INTERPOLATION SPLINE");
    let grid = load(&text).unwrap();
    assert_eq!(grid.nx(), 3);
}

#[test]
fn extra_trailing_tokens_are_ignored() {
    let mut text = unit_grid_header();
    text.push_str("00001 0.0 0.0 1.5 2.5 3.5 99 -0158 extra tokens here\n");
    let grid = load(&text).unwrap();
    assert_eq!(grid.cell_value(0, 0, 0), 1.5);
}

#[test]
fn bilinear_interpolation_between_cells() {
    let grid = load(&unit_grid_text()).unwrap();

    // Exactly on a cell: the stored value comes back.
    let (tx, ty, tz) = offsets_for_cell(1, 1);
    let at_cell = grid.interpolate(0.5, 0.5);
    assert_eq!(at_cell, [tx, ty, tz]);

    // Halfway between cells (0,0) and (1,0) along x.
    let halfway = grid.interpolate(0.25, 0.0);
    assert_eq!(halfway[0], 500.0);
    assert_eq!(halfway[1], 250.0);
    assert_eq!(halfway[2], -500.0);

    // Outside the grid: no correction available.
    assert!(grid.interpolate(1.75, 0.0)[0].is_nan());
    assert!(grid.interpolate(-0.25, 0.0)[0].is_nan());
}

#[test]
fn interpolation_over_undefined_cell_is_nan() {
    let (x0, y0, x1, y1, dx, dy) = UNIT_GRID;
    let text = sparse_grid_text(x0, y0, x1, y1, dx, dy, &[(0, 0), (1, 0), (0, 1)]);
    let grid = load(&text).unwrap();
    // Cell (1,1) is undefined, so any interpolation touching it is NaN.
    assert!(grid.interpolate(0.25, 0.25)[0].is_nan());
    // A query on the defined corner still works.
    assert_eq!(grid.interpolate(0.0, 0.0)[0], 0.0);
}

#[test]
fn cache_returns_shared_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grid_file(dir.path(), "cached.txt", &unit_grid_text());
    let cache = GridCache::new(4);

    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
    assert!(stats.hit_rate() > 49.0);
}

#[test]
fn cache_evicts_least_recently_used() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_grid_file(dir.path(), "a.txt", &unit_grid_text());
    let b = write_grid_file(dir.path(), "b.txt", &unit_grid_text());
    let cache = GridCache::new(1);

    cache.get_or_load(&a).unwrap();
    cache.get_or_load(&b).unwrap();
    cache.get_or_load(&a).unwrap();

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 3);
    assert_eq!(cache.len(), 1);
}

#[test]
fn provider_resolves_against_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_file(dir.path(), "gr3df97a.txt", &unit_grid_text());
    let provider = GeocentricTranslation::new(GridSettings {
        data_dir: Some(dir.path().to_path_buf()),
        cache_capacity: 4,
    });

    let grid = provider.default_grid().unwrap();
    assert_eq!(grid.nx(), 3);
    assert_eq!(provider.cache_stats().misses, 1);

    let cs = provider.grid_coordinate_system().unwrap();
    assert_eq!(cs.dimension(), 2);
}

#[test]
fn missing_file_names_the_path() {
    let provider = GeocentricTranslation::new(GridSettings::default());
    let error = provider.grid(Path::new("no_such_grid.txt")).unwrap_err();
    assert!(error.to_string().contains("no_such_grid.txt"));
}
