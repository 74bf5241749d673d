use std::fmt;

/// Number of general purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// A general purpose register number, always in `0..NUM_REGISTERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Register(u8);

impl Register {
    pub const ZERO: Register = Register(0);
    /// `$1`, first argument of a session.
    pub const ARG1: Register = Register(1);
    /// `$2`, second argument of a session.
    pub const ARG2: Register = Register(2);
    /// `$30`, the frame/stack pointer.
    pub const FRAME_POINTER: Register = Register(30);
    /// `$31`, the return address.
    pub const RETURN_ADDRESS: Register = Register(31);

    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_REGISTERS {
            Some(Register(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Register> {
        (0..NUM_REGISTERS as u8).map(Register)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// General purpose registers plus `hi`, `lo` and `pc`.
///
/// `$0` is hard-wired to zero: writes to it are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: [u32; NUM_REGISTERS],
    pub hi: u32,
    pub lo: u32,
    pub pc: u32,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Register) -> u32 {
        match reg {
            Register::ZERO => 0,
            _ => self.gpr[reg.index()],
        }
    }

    pub fn set(&mut self, reg: Register, value: u32) {
        match reg {
            Register::ZERO => {} // Zero register is read-only and always zero
            _ => self.gpr[reg.index()] = value,
        }
    }

    /// `(register, value)` for every general purpose register.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u32)> + '_ {
        Register::all().map(|reg| (reg, self.get(reg)))
    }
}
