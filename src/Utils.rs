//! different utility modules used by the command line front-end
/// TOML configuration of a generator run
pub mod config;
/// simplelog setup
pub mod logger;
