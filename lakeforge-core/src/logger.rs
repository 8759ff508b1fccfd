use crate::analysis::{DailyLogEntry, HourlyLogEntry, PondReport};
use crate::error::LakeforgeError;
use csv::Writer;
use std::fs;
use std::io;

/// One CSV row per pond with its daily benthic and phytoplankton production.
pub struct DailyProductionLogger<W: io::Write = fs::File> {
    writer: Writer<W>,
}

impl DailyProductionLogger<fs::File> {
    pub fn new(path: &str) -> Result<Self, LakeforgeError> {
        let writer =
            Writer::from_path(path).map_err(|e| LakeforgeError::CsvError(path.to_string(), e))?;
        Ok(Self { writer })
    }
}

impl<W: io::Write> DailyProductionLogger<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Writer::from_writer(writer),
        }
    }

    pub fn log_report(&mut self, report: &PondReport) -> Result<(), LakeforgeError> {
        self.log_entry(&report.daily_log_entry())
    }

    pub fn log_entry(&mut self, entry: &DailyLogEntry) -> Result<(), LakeforgeError> {
        self.writer
            .serialize(entry)
            .map_err(|e| LakeforgeError::CsvError("daily production log".to_string(), e))?;
        self.writer.flush().map_err(|e| {
            LakeforgeError::FileIO("daily production log".to_string(), e)
        })
    }

    pub fn into_inner(self) -> Result<W, LakeforgeError> {
        self.writer.into_inner().map_err(|e| {
            LakeforgeError::FileIO("daily production log".to_string(), e.into_error())
        })
    }
}

/// One CSV row per pond per time step of the day.
pub struct HourlyProductionLogger<W: io::Write = fs::File> {
    writer: Writer<W>,
}

impl HourlyProductionLogger<fs::File> {
    pub fn new(path: &str) -> Result<Self, LakeforgeError> {
        let writer =
            Writer::from_path(path).map_err(|e| LakeforgeError::CsvError(path.to_string(), e))?;
        Ok(Self { writer })
    }
}

impl<W: io::Write> HourlyProductionLogger<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Writer::from_writer(writer),
        }
    }

    /// Failed ponds have no hourly rows.
    pub fn log_report(&mut self, report: &PondReport) -> Result<(), LakeforgeError> {
        for entry in report.hourly_log_entries() {
            self.log_entry(&entry)?;
        }
        Ok(())
    }

    pub fn log_entry(&mut self, entry: &HourlyLogEntry) -> Result<(), LakeforgeError> {
        self.writer
            .serialize(entry)
            .map_err(|e| LakeforgeError::CsvError("hourly production log".to_string(), e))?;
        self.writer.flush().map_err(|e| {
            LakeforgeError::FileIO("hourly production log".to_string(), e)
        })
    }

    pub fn into_inner(self) -> Result<W, LakeforgeError> {
        self.writer.into_inner().map_err(|e| {
            LakeforgeError::FileIO("hourly production log".to_string(), e.into_error())
        })
    }
}
