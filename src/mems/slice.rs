use std::ops::Range;

use crate::err::MemoryError;
use crate::mems::memory::{Memory, RawRead};

/// Flat memory backed by a single zeroed buffer.
///
/// Only bounds are checked here; size and alignment policy belongs to
/// whatever wraps this store.
#[derive(Debug)]
pub struct SliceMemory {
    memory: Box<[u8]>, // memory content
}

impl SliceMemory {
    pub fn new(size: usize) -> Self {
        SliceMemory {
            memory: vec![0; size].into_boxed_slice(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }

    // Translate an address range into buffer indices
    fn range(
        &self,
        start: u64,
        num_bytes: u64,
        was_read: bool,
    ) -> Result<Range<usize>, MemoryError> {
        let fault = || MemoryError::segfault(start, num_bytes, was_read);
        let end = start.checked_add(num_bytes).ok_or_else(fault)?;
        if end > self.size() {
            return Err(fault());
        }
        let start = usize::try_from(start).map_err(|_| fault())?;
        let end = usize::try_from(end).map_err(|_| fault())?;
        Ok(start..end)
    }
}

impl Memory for SliceMemory {
    fn read_one_byte(&mut self, index: u64) -> Result<u8, MemoryError> {
        let range = self.range(index, 1, true)?;
        Ok(self.memory[range.start])
    }

    fn write_one_byte(&mut self, val: u8, index: u64) -> Result<(), MemoryError> {
        let range = self.range(index, 1, false)?;
        self.memory[range.start] = val;
        Ok(())
    }

    fn read_raw(&mut self, start: u64, num_bytes: u64) -> Result<RawRead<'_>, MemoryError> {
        let range = self.range(start, num_bytes, true)?;
        Ok(RawRead::Backed(&mut self.memory[range]))
    }

    fn write_raw(&mut self, data: &[u8], start: u64) -> Result<(), MemoryError> {
        let range = self.range(start, data.len() as u64, false)?;
        self.memory[range].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.memory.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mems::memory::MemoryExt;

    #[test]
    fn test_basic_operations() {
        let mut memory = SliceMemory::new(0x100);
        assert_eq!(memory.size(), 0x100);

        memory.write::<u32>(0x10, 0x12345678).unwrap();
        assert_eq!(memory.read::<u32>(0x10).unwrap(), 0x12345678);
        assert_eq!(memory.read_one_byte(0x10).unwrap(), 0x12);
        assert_eq!(memory.read_one_byte(0x13).unwrap(), 0x78);

        memory.write_one_byte(0xaa, 0xff).unwrap();
        assert_eq!(memory.read_one_byte(0xff).unwrap(), 0xaa);
    }

    #[test]
    fn test_bounds_checking() {
        let mut memory = SliceMemory::new(0x100);

        assert!(matches!(
            memory.read_one_byte(0x100),
            Err(MemoryError::SegmentationFault {
                location: 0x100,
                num_bytes: 1,
                was_read: true
            })
        ));
        assert!(matches!(
            memory.write_one_byte(1, 0x100),
            Err(MemoryError::SegmentationFault { was_read: false, .. })
        ));
        assert!(matches!(
            memory.read_raw(0xfe, 4),
            Err(MemoryError::SegmentationFault {
                location: 0xfe,
                num_bytes: 4,
                was_read: true
            })
        ));
        assert!(memory.write_raw(&[1, 2, 3, 4], 0xfd).is_err());
        assert!(memory.read_raw(u64::MAX, 2).is_err());

        // The last bytes are still reachable
        assert!(memory.read_raw(0xfc, 4).is_ok());
    }

    #[test]
    fn test_raw_reads_are_backed() {
        let mut memory = SliceMemory::new(0x20);
        memory.write_raw(&[1, 2, 3, 4], 8).unwrap();

        {
            let mut view = memory.read_raw(8, 4).unwrap();
            assert!(view.is_backed());
            assert_eq!(view.as_slice(), &[1, 2, 3, 4]);
            view[0] = 0xee;
        }

        assert_eq!(memory.read_one_byte(8).unwrap(), 0xee);
    }

    #[test]
    fn test_arbitrary_length_access() {
        let mut memory = SliceMemory::new(0x40);
        let image: Vec<u8> = (0..37).collect();
        memory.write_raw(&image, 3).unwrap();
        assert_eq!(memory.read_raw(3, 37).unwrap().as_slice(), image.as_slice());
        assert_eq!(&memory.as_bytes()[3..40], image.as_slice());

        assert!(memory.read_raw(0, 0).unwrap().is_empty());
        memory.write_raw(&[], 0x40).unwrap();
    }

    #[test]
    fn test_array_operations() {
        let mut memory = SliceMemory::new(0x100);
        let values = vec![1u32, 2, 3, 0xffff_ffff, 5];
        memory.write_array(0x20, &values).unwrap();
        assert_eq!(memory.read_array::<u32>(0x20, 5).unwrap(), values);
        assert_eq!(&memory.as_bytes()[0x2c..0x30], &[0xff, 0xff, 0xff, 0xff]);
    }
}
