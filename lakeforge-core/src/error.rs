use thiserror::Error;

#[derive(Debug, Error)]
pub enum LakeforgeError {
    #[error("Invalid bathymetry sample at depth {depth} m with area {area} m²: depth must be >= 0 and area > 0")]
    InvalidSample { depth: f64, area: f64 },

    #[error("No shape data exists for this pond")]
    EmptyShape,

    #[error("Cannot interpolate {quantity}: need at least 2 data points, found {points}")]
    InsufficientData { quantity: &'static str, points: usize },

    #[error("Invalid measurement: {0}")]
    InvalidMeasurementType(String),

    #[error("A pond holds at most 3 thermal layers of phytoplankton measurements, got {0}")]
    TooManyThermalLayers(usize),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
