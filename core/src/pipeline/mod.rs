pub mod adapter;
pub mod cluster;
pub mod filter;
pub mod occupancy;
pub mod projector;

pub use adapter::read_radar;
pub use cluster::cluster;
pub use occupancy::ZoneOccupancy;
pub use projector::project;
