//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON) and exit codes
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Result renderers
//!
//! ## Usage
//!
//! ```ignore
//! use hoist::presentation::factory;
//!
//! let use_case = factory::create_sync_use_case(&config, &server);
//! let result = use_case.execute(&request)?;
//! ```

pub mod factory;
pub mod output;

pub use factory::{base_sync_options, create_sync_use_case, ConcreteSyncUseCase};
pub use output::{exit_code, result_exit_code, OutputFormat, EXIT_FAILURE, EXIT_REMOTE_EXISTS};
