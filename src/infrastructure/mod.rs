//! Infrastructure helpers for the Zellij sandbox environment.

pub mod paths;

pub use paths::get_data_dir;
