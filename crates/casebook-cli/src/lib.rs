//! # casebook-cli
//!
//! Command-line front end for Casebook case studies.
//!
//! The `casebook` binary drives the same dialog shell and detail lookup a
//! web front end would, printing plain text instead:
//! - `show`: open the case-study dialog and print what it settles on
//! - `detail`: detail page with key metrics and related case studies
//! - `list`: filtered listing
//! - `extract`: offline extraction of a JSON record
//! - `config`: inspect or create the configuration file

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction};
pub use config::CasebookConfig;
pub use error::{Error, Result};
