pub mod fs;
pub mod seed;
