//! tfn Core - Shared functionality for the tfn terraform wrapper
//!
//! Fixed names, standard paths and small formatting helpers used by the
//! wrapper crate.

pub mod consts;
pub mod format;
pub mod paths;

pub use paths::Paths;
