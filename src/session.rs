//! Session bootstrap for CS241 MIPS programs.
//!
//! A session owns the register file and the memory-mapped memory a processor
//! core runs against. The constructors mirror the two CS241 calling
//! conventions: two integers passed in `$1`/`$2`, or an array whose address
//! and length are passed in `$1`/`$2`.

use std::io::{Read, Write};

use crate::devices::mmio::MemoryMappedIO;
use crate::err::SessionError;
use crate::mems::memory::{Memory, MemoryExt};
use crate::mems::slice::SliceMemory;
use crate::regs::register_file::{Register, RegisterFile};

/// Return address the program jumps to when it is done.
pub const RETURN_SENTINEL: u32 = 0xffff_ffff;

pub struct Session<R, W> {
    registers: RegisterFile,
    memory: MemoryMappedIO<SliceMemory, R, W>,
}

impl<R: Read, W: Write> Session<R, W> {
    /// All registers and `memory_size` bytes of memory set to zero.
    pub fn zeroed(memory_size: u32, stdin: R, stdout: W) -> Self {
        let backing = SliceMemory::new(memory_size as usize);
        Self {
            registers: RegisterFile::new(),
            memory: MemoryMappedIO::with_cs241(backing, stdin, stdout),
        }
    }

    /// Load `program` and pass `a` and `b` in `$1` and `$2`.
    pub fn two_ints(
        memory_size: u32,
        program: &[u8],
        a: i32,
        b: i32,
        stdin: R,
        stdout: W,
    ) -> Result<Self, SessionError> {
        let mut session = Self::zeroed(memory_size, stdin, stdout);
        session.registers.set(Register::ARG1, a as u32);
        session.registers.set(Register::ARG2, b as u32);
        session.setup_cs241(program)?;
        Ok(session)
    }

    /// Load `program` followed by `values` as big-endian words, passing the
    /// array's address in `$1` and its length in `$2`.
    pub fn array(
        memory_size: u32,
        program: &[u8],
        values: &[i32],
        stdin: R,
        stdout: W,
    ) -> Result<Self, SessionError> {
        let mut session = Self::zeroed(memory_size, stdin, stdout);
        session.check_fits(program)?;

        let location = program.len() as u32;
        let array_end = (values.len() as u64)
            .checked_mul(4)
            .and_then(|bytes| bytes.checked_add(location as u64));
        if array_end.is_none_or(|end| end > memory_size as u64) {
            return Err(SessionError::ArrayTooLarge {
                location,
                len: values.len(),
                memory_size,
            });
        }

        let words: Vec<u32> = values.iter().map(|&value| value as u32).collect();
        session
            .memory
            .backing_mut()
            .write_array(location as u64, &words)?;
        log::info!("Loaded array of {} words at {location:#x}", values.len());

        session.registers.set(Register::ARG1, location);
        session.registers.set(Register::ARG2, values.len() as u32);
        session.setup_cs241(program)?;
        Ok(session)
    }

    fn check_fits(&self, program: &[u8]) -> Result<(), SessionError> {
        let memory_size = self.memory.size();
        if program.len() as u64 > memory_size {
            return Err(SessionError::ProgramTooLarge {
                program_len: program.len(),
                memory_size: memory_size as u32,
            });
        }
        Ok(())
    }

    // The image is copied straight into the backing store: it is not a
    // single word access, and it lives below the device words anyway.
    fn setup_cs241(&mut self, program: &[u8]) -> Result<(), SessionError> {
        self.check_fits(program)?;
        self.memory.backing_mut().write_raw(program, 0)?;
        log::info!("Loaded program of size: {}", program.len());

        let memory_size = self.memory.size() as u32;
        self.registers.set(Register::RETURN_ADDRESS, RETURN_SENTINEL);
        self.registers.set(Register::FRAME_POINTER, memory_size);
        Ok(())
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &MemoryMappedIO<SliceMemory, R, W> {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryMappedIO<SliceMemory, R, W> {
        &mut self.memory
    }

    pub fn into_parts(self) -> (RegisterFile, MemoryMappedIO<SliceMemory, R, W>) {
        (self.registers, self.memory)
    }
}
