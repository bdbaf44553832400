mod config;
mod error;
pub mod helpers;
mod patch;
mod principal;
mod types;

pub use config::*;
pub use error::*;
pub use patch::*;
pub use principal::*;
pub use types::*;
