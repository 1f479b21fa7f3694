//! Provider for geocentric translation by grid interpolation.
//!
//! The coordinate-operation layer supplies a grid file parameter; this
//! provider resolves it against the configured data directory, loads
//! the grid through the process-wide cache, and tells callers which
//! coordinate system grid queries are expressed in.

use crate::cache::{CacheStats, GridCache};
use crate::error::Result;
use crate::grid::ShiftGrid;
use crate::settings::GridSettings;
use referencing_common::axis::axes;
use referencing_common::{CoordinateSystem, CsKind};
use std::path::Path;
use std::sync::Arc;

/// Default grid file name distributed by the French mapping agency.
pub const DEFAULT_GRID_FILE: &str = "gr3df97a.txt";

/// Entry point for obtaining geocentric translation grids.
pub struct GeocentricTranslation {
    settings: GridSettings,
    cache: GridCache,
}

impl GeocentricTranslation {
    /// Create a provider with the given settings.
    pub fn new(settings: GridSettings) -> GeocentricTranslation {
        let capacity = settings.cache_capacity;
        GeocentricTranslation {
            settings,
            cache: GridCache::new(capacity),
        }
    }

    /// The grid for the given file parameter, loaded once and then
    /// served from the cache.
    pub fn grid(&self, file: &Path) -> Result<Arc<ShiftGrid>> {
        self.cache.get_or_load(&self.settings.resolve(file))
    }

    /// The grid for the agency's default file name.
    pub fn default_grid(&self) -> Result<Arc<ShiftGrid>> {
        self.grid(Path::new(DEFAULT_GRID_FILE))
    }

    /// The coordinate system grid queries are expressed in: geodetic
    /// longitude and latitude in degrees, in that (right-handed) order.
    /// Coordinates must be normalized to this form before indexing.
    pub fn grid_coordinate_system(&self) -> Result<CoordinateSystem> {
        let cs = CoordinateSystem::new(
            "Grid coordinates",
            CsKind::Ellipsoidal,
            vec![axes::geodetic_longitude(), axes::geodetic_latitude()],
        )?;
        Ok(cs)
    }

    /// Statistics of the underlying grid cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The settings this provider was created with.
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }
}

impl Default for GeocentricTranslation {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}
