//! orgtree: build an organization's management tree from flat employee
//! records and find the closest common manager of two employees.
//!
//! Layers, inner to outer:
//! - [`domain`]: records, the arena tree, builder and ancestry queries (no I/O)
//! - [`application`]: data file loading on top of the domain
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
