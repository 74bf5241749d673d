pub mod register_file;

pub use register_file::*;
