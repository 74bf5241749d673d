pub mod debugger;
pub mod devices;
pub mod err;
pub mod mems;
pub mod regs;
pub mod session;

pub use devices::*;
pub use err::*;
pub use mems::*;
pub use regs::*;
pub use session::*;
