pub mod http;
pub mod readings;
