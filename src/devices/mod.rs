pub mod boundary;
pub mod device_word;
pub mod mmio;
pub mod stream;

pub use boundary::*;
pub use device_word::*;
pub use mmio::*;
pub use stream::*;
