pub mod check;
mod common;
pub mod policy;
pub mod status;
pub mod unlock;
