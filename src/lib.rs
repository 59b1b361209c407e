pub mod demographics;
pub mod loader;
pub mod rentals;
pub mod report;
pub mod zips;
