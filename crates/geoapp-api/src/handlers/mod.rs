mod features;
mod health;
mod spatial;
mod tables;

pub use features::get_geojson;
pub use health::health_check;
pub use spatial::spatial_data;
pub use tables::list_tables;
