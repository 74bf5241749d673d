use std::ops::{Deref, DerefMut};

use crate::err::MemoryError;

/// Result of a raw read.
///
/// `Backed` borrows the backing store, so writes through it are visible to
/// later reads at the same location. `Copied` owns its bytes and never
/// aliases memory.
#[derive(Debug, PartialEq, Eq)]
pub enum RawRead<'a> {
    Backed(&'a mut [u8]),
    Copied(Vec<u8>),
}

impl RawRead<'_> {
    pub fn is_backed(&self) -> bool {
        matches!(self, RawRead::Backed(_))
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            RawRead::Backed(bytes) => bytes,
            RawRead::Copied(bytes) => bytes,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            RawRead::Backed(bytes) => bytes,
            RawRead::Copied(bytes) => bytes,
        }
    }

    /// Drops the borrow on the backing store, copying the bytes if needed.
    pub fn detach(self) -> RawRead<'static> {
        RawRead::Copied(self.into_vec())
    }

    pub fn into_vec(self) -> Vec<u8> {
        match self {
            RawRead::Backed(bytes) => bytes.to_vec(),
            RawRead::Copied(bytes) => bytes,
        }
    }
}

impl Deref for RawRead<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for RawRead<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

/// Byte-addressable memory as seen by the processor core.
pub trait Memory {
    fn read_one_byte(&mut self, index: u64) -> Result<u8, MemoryError>;
    fn write_one_byte(&mut self, val: u8, index: u64) -> Result<(), MemoryError>;
    fn read_raw(&mut self, start: u64, num_bytes: u64) -> Result<RawRead<'_>, MemoryError>;
    fn write_raw(&mut self, data: &[u8], start: u64) -> Result<(), MemoryError>;
    /// Size in bytes this memory can represent
    fn size(&self) -> u64;
}

// Traits for generic type handling. The machine is big-endian.
pub trait FromBytes: Sized {
    const SIZE: u64;
    fn from_be_slice(bytes: &[u8]) -> Self;
}

pub trait ToBytes {
    fn to_be_vec(&self) -> Vec<u8>;
}

impl FromBytes for u8 {
    const SIZE: u64 = 1;

    fn from_be_slice(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl FromBytes for u16 {
    const SIZE: u64 = 2;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u16::from_be_bytes([bytes[0], bytes[1]])
    }
}

impl FromBytes for u32 {
    const SIZE: u64 = 4;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl ToBytes for u8 {
    fn to_be_vec(&self) -> Vec<u8> {
        vec![*self]
    }
}

impl ToBytes for u16 {
    fn to_be_vec(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

impl ToBytes for u32 {
    fn to_be_vec(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

/// Typed accesses layered on the raw operations, so they are subject to the
/// same size and alignment rules as the memory they run against.
pub trait MemoryExt: Memory {
    fn read<T>(&mut self, address: u64) -> Result<T, MemoryError>
    where
        T: FromBytes,
    {
        let data = self.read_raw(address, T::SIZE)?;
        Ok(T::from_be_slice(&data))
    }

    fn write<T>(&mut self, address: u64, value: T) -> Result<(), MemoryError>
    where
        T: ToBytes,
    {
        self.write_raw(&value.to_be_vec(), address)
    }

    fn read_array<T>(&mut self, address: u64, count: usize) -> Result<Vec<T>, MemoryError>
    where
        T: FromBytes,
    {
        let mut result = Vec::with_capacity(count);
        let mut location = address;
        for _ in 0..count {
            result.push(self.read::<T>(location)?);
            location = location.wrapping_add(T::SIZE);
        }
        Ok(result)
    }

    fn write_array<T>(&mut self, address: u64, values: &[T]) -> Result<(), MemoryError>
    where
        T: ToBytes,
    {
        let mut location = address;
        for value in values {
            let bytes = value.to_be_vec();
            self.write_raw(&bytes, location)?;
            location = location.wrapping_add(bytes.len() as u64);
        }
        Ok(())
    }
}

impl<M: Memory + ?Sized> MemoryExt for M {}
