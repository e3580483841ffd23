use serde::Deserialize;

/// Query parameters of the point analytics endpoint, parsed by the analyzer
#[derive(Debug, Default, Deserialize)]
pub struct SpatialDataParams {
    pub x: Option<String>,
    pub y: Option<String>,
}
