//! Flight Statistics Library
//!
//! A Rust library for building flight statistics from IGC flight logs:
//! number of flights and airtime per day, month, year and glider.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV report export
//! - **`cli`** (default): Build the `flightstat` command-line binary
//! - **`json`**: Enable JSON report export
//! - **`serde`**: Enable serialization/deserialization of types
//! - **`xlsx`**: Enable Excel workbook export
//!
//! # Quick Start
//!
//! Parse a few tracks and print the statistics:
//! ```rust,no_run
//! use flightstat::{parse_igc_files, FlightStat, StatOptions};
//!
//! let flights = parse_igc_files(&["2016-10-01.igc", "2016-10-05.igc"]).unwrap();
//! let stat = FlightStat::build(&flights, StatOptions::with_default_glider("Advance Alpha 6"));
//! for row in stat.render() {
//!     let (label, flights, minutes) = row.as_tuple();
//!     println!("{label}: {flights} flights, {minutes:.2} min");
//! }
//! ```
//!
//! Export the flight listing and statistics to CSV:
//! ```rust,no_run
//! use flightstat::{export_report, parse_igc_files, ExportOptions};
//!
//! let flights = parse_igc_files(&["2016-10-01.igc"]).unwrap();
//! let report = export_report(&flights, &ExportOptions::default()).unwrap();
//! println!("Exported to: {}", report.output_path.display());
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_igc_files`] - Parse several IGC files, sorted by takeoff
//! - [`parse_igc_file`] - Parse one IGC file
//! - [`parse_igc_bytes`] / [`parse_igc_str`] - Parse IGC data from memory
//!
//! ## Statistics
//! - [`FlightStat`] - Year → month → day and per-glider totals
//! - [`StatOptions`] - Default glider and glider breakdown switch
//! - [`ReportRow`] - One row of the ordered statistics report
//!
//! ## Export Functions
//! - [`export_report`] - Render a report and write it to disk
//! - [`render_csv`] - CSV flight listing and statistics in memory
//! - [`render_sheet`] - Spreadsheet rows in an in-memory [`Sheet`]
//! - [`write_report_sheet`] - Spreadsheet rows for any [`SheetWriter`]
//! - [`compute_output_path`] - Report path for a set of options

pub mod conversion;
pub mod error;
pub mod export;
pub mod parser;
pub mod sheet;
pub mod stats;
pub mod types;
#[cfg(feature = "xlsx")]
pub mod xlsx;

// Re-export everything from modules for convenience
pub use conversion::*;
pub use error::*;
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
pub use sheet::*;
#[allow(ambiguous_glob_reexports)]
pub use stats::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
#[cfg(feature = "xlsx")]
pub use xlsx::*;

// Re-export Result type for convenience
pub use anyhow::Result;
