//! Core data structures for Quay.
//!
//! This module contains the foundational types used throughout Quay:
//! - Interpreter environment descriptions
//! - Package identifiers and sets
//! - The crate error taxonomy

pub mod error;
pub mod interpreter;
pub mod package;

pub use error::{Error, Result};
pub use interpreter::{InterpreterConfig, LanguageVersion};
pub use package::{PackageSet, PackageSpec};
