pub mod address;
pub mod collector;
pub mod config;
pub mod country;
pub mod fetch_error;
pub mod fetcher;
pub mod importers;
pub mod location;
pub mod sections;
pub mod services;
pub mod utils;
pub mod xml_output;
