use crate::catalogue::TableDescriptor;
use crate::error::{GeoappError, Result};
use crate::filter::FilterSet;

/// Largest coordinate precision accepted for GeoJSON output
pub const MAX_PRECISION: u32 = 15;

/// Output options of a feature retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// SRID the geometry is reprojected to
    pub target_srid: i32,
    /// Decimal digits kept in GeoJSON coordinates
    pub precision: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { target_srid: 4326, precision: 6 }
    }
}

impl FetchOptions {
    pub fn with_target_srid(mut self, srid: i32) -> Self {
        self.target_srid = srid;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_srid <= 0 {
            return Err(GeoappError::InvalidParameter {
                name: "target_srid".to_string(),
                reason: format!("{} is not a valid SRID", self.target_srid),
            });
        }
        if self.precision > MAX_PRECISION {
            return Err(GeoappError::InvalidParameter {
                name: "precision".to_string(),
                reason: format!("must be at most {}, got {}", MAX_PRECISION, self.precision),
            });
        }
        Ok(())
    }
}

/// A validated retrieval handed to a feature store
#[derive(Debug, Clone, Copy)]
pub struct FeatureQuery<'a> {
    pub table: &'a TableDescriptor,
    pub filters: &'a FilterSet,
    pub options: FetchOptions,
}
