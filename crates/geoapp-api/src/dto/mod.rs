mod request;
mod response;

pub use request::SpatialDataParams;
pub use response::{HealthResponse, TableInfo};
