#![deny(unsafe_code)]

//! Mapping resolver.
//!
//! Translates the fixed label catalog into concrete columns of a loaded
//! dataset. A substring heuristic proposes a column per label
//! ([`suggest`]); explicit user choices always win ([`resolve`]);
//! [`MappingState`] keeps those choices for one session and re-validates
//! them against the current column list on every read.

pub mod assign;
pub mod error;
pub mod resolve;
pub mod state;
pub mod suggest;

pub use assign::{load_mapping_file, parse_assignment, parse_selection};
pub use error::{MapError, Result};
pub use resolve::{Choice, resolve};
pub use state::{LabelStatus, MappingState, MappingSummary};
pub use suggest::{suggest, suggest_all};
