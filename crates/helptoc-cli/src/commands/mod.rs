//! Command implementations for the helptoc CLI

mod config;
mod path;
mod search;
mod show;
mod source;

pub use config::execute as config;
pub use path::execute as path;
pub use search::execute as search;
pub use show::execute as show;
