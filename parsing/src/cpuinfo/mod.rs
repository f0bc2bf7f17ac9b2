//! Extraction of the product name, cpu name, clock speed and cpu count from the
//! cpuinfo dumps collected off Intel, IBM (AIX), Sun (Solaris) and AMD machines.
//!
//! Every vendor writes a different report, so each one gets its own line handler and
//! they are not unified on purpose, the heuristics have nothing in common.
use log::{debug, trace};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod amd;
mod ibm;
mod intel;
mod lexer;
mod sun;

use intel::IntelState;
use sun::SunState;

/// Column label width in the csv output
const LABEL_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vendor {
    #[default]
    Unknown,
    Intel,
    Ibm,
    Sun,
    Amd,
}

impl Vendor {
    /// Classify a line by the vendor keyword in it, falling back to `current`.
    ///
    /// Keywords are checked in order and a later one on the same line wins.
    pub fn detect(line: &str, current: Vendor) -> Vendor {
        let mut vendor = current;
        if line.contains("Intel") {
            vendor = Vendor::Intel;
        }
        if line.contains("PowerPC") {
            vendor = Vendor::Ibm;
        }
        if line.contains("sparc") {
            vendor = Vendor::Sun;
        }
        if line.contains("AMD") {
            vendor = Vendor::Amd;
        }
        vendor
    }
}

/// Everything pulled out of a cpuinfo dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuInfo {
    /// Something like "ProLiant DL380p Gen8"
    pub product_name: String,
    /// Something like "XeonE5-2690" or "POWER8"
    pub cpu_name: String,
    /// Clock speed in MHz, kept as it was written in the dump
    pub cpu_speed: String,
    pub cpu_count: u64,
}

impl Default for CpuInfo {
    fn default() -> Self {
        Self {
            product_name: String::from(" "),
            cpu_name: String::from(" "),
            cpu_speed: String::from("0"),
            cpu_count: 1,
        }
    }
}

impl CpuInfo {
    /// The four csv rows, in the layout the collection wrapper concatenates with the rest of its output:
    ///
    /// `CPUINFO , PRODUCT_NAME    ,     ,                     , ProLiant DL380p Gen8`
    pub fn csv_rows(&self) -> [String; 4] {
        let row = |label: &str, value: &str| {
            format!(
                "CPUINFO , {:<width$},     ,                     , {}",
                label,
                value.trim_end(),
                width = LABEL_WIDTH
            )
        };
        [
            row("PRODUCT_NAME", &self.product_name),
            row("CPU_NAME", &self.cpu_name),
            row("CPU_SPEED", &self.cpu_speed),
            row("CPU_NUM", &self.cpu_count.to_string()),
        ]
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read cpuinfo dump {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("expected {expected} on line {line_number}: {line:?}")]
    PatternNotFound {
        expected: &'static str,
        line_number: usize,
        line: String,
    },
}

/// Returned by the vendor handlers when a line is missing what they were looking for,
/// [ParseState] turns it into a [ExtractError::PatternNotFound]
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Missing(pub &'static str);

/// The state carried from one line of a dump to the next
#[derive(Debug, Default)]
pub struct ParseState {
    vendor: Vendor,
    info: CpuInfo,
    line_number: usize,
    intel: IntelState,
    sun: SunState,
    /// How many lines were handled while the vendor was still unknown
    unknown_lines: usize,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vendor the most recent keyword pointed at
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Handle a single line, terminator included
    pub fn feed_line(&mut self, line: &str) -> Result<(), ExtractError> {
        self.line_number += 1;
        trace!("line {}: {:?}", self.line_number, line);

        let vendor = Vendor::detect(line, self.vendor);
        if vendor != self.vendor {
            debug!(
                "vendor changed from {:?} to {:?} on line {}",
                self.vendor, vendor, self.line_number
            );
            self.vendor = vendor;
        }

        let output = match self.vendor {
            Vendor::Intel => intel::parse_line(&mut self.intel, &mut self.info, line),
            Vendor::Ibm => ibm::parse_line(&mut self.info, line),
            Vendor::Sun => sun::parse_line(&mut self.sun, &mut self.info, line),
            Vendor::Amd => amd::parse_line(&mut self.info, line),
            Vendor::Unknown => {
                // with no vendor in sight the first two lines are taken as they are
                match self.unknown_lines {
                    0 => self.info.cpu_name = line.to_string(),
                    1 => self.info.product_name = line.to_string(),
                    _ => {}
                }
                self.unknown_lines += 1;
                Ok(())
            }
        };
        output.map_err(|Missing(expected)| ExtractError::PatternNotFound {
            expected,
            line_number: self.line_number,
            line: line.to_string(),
        })
    }

    pub fn finish(self) -> CpuInfo {
        self.info
    }
}

/// Run every line of a dump through a fresh [ParseState]
pub fn extract_str(input: &str) -> Result<CpuInfo, ExtractError> {
    let mut state = ParseState::new();
    for line in lexer::split_lines(input) {
        state.feed_line(&line)?;
    }
    debug!("parsed {} lines as {:?}", state.line_number, state.vendor);
    Ok(state.finish())
}

/// Read a dump from disk and extract it, see [extract_str]
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<CpuInfo, ExtractError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ExtractError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    extract_str(&contents)
}
