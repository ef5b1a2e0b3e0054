//! Step files: the YAML front end to the runner.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - `${key}` interpolation in [`interpolation`]
//! - Conversion into [`crate::steps::Step`] values in [`compile`]
//!
//! The engine itself never reads files; embedding programs can build steps
//! directly and skip this module.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use runbook::config::{compile, parse_step_file};
//! use runbook::ui::{MockUI, UserInterface};
//!
//! let yaml = r#"
//! steps:
//!   - name: get hostname
//!     type: prompt
//!     query: "enter a hostname:"
//!     save_as: hostname
//!   - name: "set hostname to ${hostname}"
//!     type: shell
//!     run: "echo ${hostname} > /etc/hostname"
//! "#;
//!
//! let file = parse_step_file(yaml, std::path::Path::new("install.yml")).unwrap();
//! let ui: Arc<dyn UserInterface> = Arc::new(MockUI::new());
//! let steps = compile(&file, &ui).unwrap();
//! assert_eq!(steps.len(), 2);
//! ```

pub mod compile;
pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use compile::{compile, compile_step, conditional, template};
pub use interpolation::{extract_variables, has_interpolation, interpolate, parse_interpolation, Segment};
pub use loader::{load_step_file, parse_step_file};
pub use schema::{Condition, HandlerConfig, ResponseFormat, StepConfig, StepFile};
pub use validator::{validate, validate_step_file, ValidationError};
