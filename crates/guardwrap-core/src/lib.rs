//! Permission-guard injection for page sources.
//!
//! guardwrap wraps marker-delimited regions of page documents in a
//! permission guard element and makes sure the guard is imported:
//!
//! - [`mapping`]: validated module → component → permission key table
//! - [`import`]: anchored, idempotent guard import
//! - [`region`]: minimal-span location and idempotent wrapping
//! - [`processor`]: per-file orchestration with write-iff-changed
//! - [`driver`]: batch over the configured modules
//!
//! # Quick Start
//!
//! ```no_run
//! use guardwrap_core::{run_batch, Context, MappingTable, ProcessOptions, Settings};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Context {
//!     table: MappingTable::builtin()?,
//!     settings: Settings::default(),
//!     options: ProcessOptions::default(),
//!     root: std::env::current_dir()?,
//! };
//! let report = run_batch(&ctx);
//! println!("{} updated", report.updated());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod import;
pub mod mapping;
pub mod marker;
pub mod processor;
pub mod region;
pub mod rules;

pub use config::{DriverSettings, GuardSettings, Settings};
pub use driver::{run_batch, run_batch_with, BatchReport, ModuleResult, ModuleRun};
pub use error::{ConfigError, MappingError, ProcessError, WrapError};
pub use import::{ensure_import, ImportOutcome};
pub use mapping::{MappingTable, Module, PermissionKey};
pub use marker::{Marker, Span};
pub use processor::{
    process_file, process_text, Context, FileReport, MissingRegionPolicy, Outcome,
    ProcessOptions, RuleReport, RuleStatus, TextReport,
};
pub use region::{wrap_region, WrapOutcome};
pub use rules::{rules_for, WrapRule};
