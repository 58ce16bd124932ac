pub mod config;
pub mod errors;
pub mod install;
pub mod materialize;
pub mod prompt;
pub mod registry;
pub mod selection;
