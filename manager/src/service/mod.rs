pub mod options;
pub mod store;
pub mod ticker;
