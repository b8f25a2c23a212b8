//! Acceptance checks for an installed decant tool.
//!
//! Runs after an install completes and is deliberately independent of the
//! install pipeline: it only sees the final binary path. A failing suite
//! does not undo the install; it signals that the installed binary is not
//! behaving like the tool the manifest describes.

pub mod suite;

pub use suite::{
    AcceptanceReport, CheckOutcome, CheckReport, HARD_TAB_RULE, LINT_FIXTURE, run_acceptance,
};
