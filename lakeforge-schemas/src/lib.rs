pub mod bathymetry;
pub mod file_formats;
pub mod measurement;
pub mod pond;
pub mod production;
