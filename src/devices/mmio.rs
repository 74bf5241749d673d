// Memory mapped IO for CS241 MIPS.
//
// Two words of the address space belong to devices rather than memory:
// reads from the stdin word pull a byte from standard input, and writes to
// the stdout word push a byte to standard output. Every other access falls
// through to the backing store untouched.
//
// Sub-word reads of the trailing stdin bytes read as zero. A raw write
// into the stdout word reaches stdout when it ends on the word's last byte
// or is a single byte at its start; other raw writes there are stored.
// Spans that straddle a device word edge are access violations.

use std::io::{Read, Write};

use crate::devices::boundary::Boundary;
use crate::devices::device_word::DeviceMap;
use crate::devices::stream::DeviceRedirector;
use crate::err::MemoryError;
use crate::mems::memory::{Memory, RawRead};

/// Reject sizes other than 1, 2 and 4 and accesses not aligned to their size.
pub fn check_access(start: u64, num_bytes: u64, was_read: bool) -> Result<(), MemoryError> {
    if !matches!(num_bytes, 1 | 2 | 4) || start & (num_bytes - 1) != 0 {
        log::debug!(
            "Rejected {} of {num_bytes} bytes at {start:#0x}",
            if was_read { "read" } else { "write" }
        );
        return Err(MemoryError::access_violation(start, num_bytes, was_read));
    }
    Ok(())
}

pub struct MemoryMappedIO<M, R, W> {
    backing: M,
    devices: DeviceMap,
    redirector: DeviceRedirector<R, W>,
}

impl<M: Memory, R: Read, W: Write> MemoryMappedIO<M, R, W> {
    pub fn new(backing: M, devices: DeviceMap, stdin: R, stdout: W) -> Self {
        Self {
            backing,
            devices,
            redirector: DeviceRedirector::new(stdin, stdout),
        }
    }

    pub fn with_cs241(backing: M, stdin: R, stdout: W) -> Self {
        Self::new(backing, DeviceMap::cs241(), stdin, stdout)
    }

    pub fn devices(&self) -> &DeviceMap {
        &self.devices
    }

    pub fn backing(&self) -> &M {
        &self.backing
    }

    /// Direct access to the backing store, bypassing the device words.
    pub fn backing_mut(&mut self) -> &mut M {
        &mut self.backing
    }

    pub fn stdin(&self) -> &R {
        self.redirector.stdin()
    }

    pub fn stdout(&self) -> &W {
        self.redirector.stdout()
    }

    pub fn into_parts(self) -> (M, R, W) {
        let (stdin, stdout) = self.redirector.into_inner();
        (self.backing, stdin, stdout)
    }
}

impl<M: Memory, R: Read, W: Write> Memory for MemoryMappedIO<M, R, W> {
    /// Reads from the first byte of the stdin word return the next byte of
    /// stdin; the other bytes of that word read as 0.
    fn read_one_byte(&mut self, index: u64) -> Result<u8, MemoryError> {
        let stdin = self.devices.stdin;
        if index == stdin.start() {
            return Ok(self.redirector.read_byte()?);
        }

        if stdin.is_trailing_byte(index) {
            return Ok(0);
        }

        self.backing.read_one_byte(index)
    }

    /// Device data is never backed. Reads that touch the stdout word are
    /// copied out so the caller cannot write into that word through them.
    fn read_raw(&mut self, start: u64, num_bytes: u64) -> Result<RawRead<'_>, MemoryError> {
        check_access(start, num_bytes, true)?;
        let len = num_bytes as usize;

        match self.devices.stdin.classify(start, num_bytes) {
            Boundary::Crosses => {
                log::debug!("Read of {num_bytes} bytes at {start:#0x} crosses the stdin word");
                Err(MemoryError::access_violation(start, num_bytes, true))
            }
            Boundary::First => {
                let mut result = vec![0; len];
                result[0] = self.redirector.read_byte()?;
                Ok(RawRead::Copied(result))
            }
            Boundary::Later => Ok(RawRead::Copied(vec![0; len])),
            Boundary::Outside => {
                let stdout = self.devices.stdout.classify(start, num_bytes);
                let data = self.backing.read_raw(start, num_bytes)?;
                match stdout {
                    Boundary::Outside => Ok(data),
                    Boundary::Crosses | Boundary::First | Boundary::Later => Ok(data.detach()),
                }
            }
        }
    }

    /// Writes to the first byte of the stdout word go to stdout; the other
    /// bytes of that word ignore writes.
    fn write_one_byte(&mut self, val: u8, index: u64) -> Result<(), MemoryError> {
        let stdout = self.devices.stdout;
        if index == stdout.start() {
            return Ok(self.redirector.write_byte(val)?);
        }

        if stdout.is_trailing_byte(index) {
            log::debug!("Dropped write of {val:#04x} to {index:#0x}");
            return Ok(());
        }

        self.backing.write_one_byte(val, index)
    }

    /// A write ending on the last byte of the stdout word sends its final
    /// byte to stdout, and a single byte written to the start of the word
    /// goes to stdout like `write_one_byte`. Everything else is stored.
    fn write_raw(&mut self, data: &[u8], start: u64) -> Result<(), MemoryError> {
        let num_bytes = data.len() as u64;
        check_access(start, num_bytes, false)?;

        let stdout = self.devices.stdout;
        let ends_on_word = start.checked_add(num_bytes - 1) == Some(stdout.last());
        match (stdout.classify(start, num_bytes), data) {
            (Boundary::Crosses, _) => {
                log::debug!("Write of {num_bytes} bytes at {start:#0x} crosses the stdout word");
                Err(MemoryError::access_violation(start, num_bytes, false))
            }
            (Boundary::First | Boundary::Later, [.., val]) if ends_on_word => {
                Ok(self.redirector.write_byte(*val)?)
            }
            (Boundary::First, [val]) => Ok(self.redirector.write_byte(*val)?),
            (Boundary::First | Boundary::Later | Boundary::Outside, _) => {
                log::trace!("Write of {num_bytes} bytes to {start:#0x}");
                self.backing.write_raw(data, start)
            }
        }
    }

    fn size(&self) -> u64 {
        self.backing.size()
    }
}
