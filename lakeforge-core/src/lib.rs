pub mod analysis;
pub mod error;
pub mod light;
pub mod logger;
pub mod numeric;
pub mod pond;
pub mod production;
pub mod shape;

pub use error::LakeforgeError;
pub use pond::{Pond, PondBuilder};
pub use shape::{BathymetricShape, PondShape};
