pub mod memory;
pub mod slice;

pub use memory::*;
pub use slice::*;
