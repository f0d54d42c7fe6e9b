//! Subcommand implementations.
//!
//! Every command takes an already-loaded dataset, runs one engine and
//! returns its output rendered in the requested [`OutputFormat`](crate::config::OutputFormat).

pub mod ddm;
pub mod fcfe;
pub mod health;
pub mod relative;
pub mod sensitivity;
pub mod simulate;
pub mod value;
pub mod wacc;
