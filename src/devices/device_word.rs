use crate::devices::boundary::{Boundary, classify};
use crate::err::MemoryError;

/// Word mapped to reading stdin
pub const STDIN_WORD: u64 = 0xffff_0004;
/// Word mapped to writing stdout
pub const STDOUT_WORD: u64 = 0xffff_000c;

/// A 4-byte aligned word whose accesses go to a stream instead of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceWord {
    start: u64,
}

impl DeviceWord {
    pub const SIZE: u64 = 4;

    pub fn new(start: u64) -> Result<Self, MemoryError> {
        if start % Self::SIZE != 0 || start.checked_add(Self::SIZE - 1).is_none() {
            return Err(MemoryError::InvalidDeviceWord { address: start });
        }
        Ok(Self { start })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    /// Address of the final byte in the word.
    pub fn last(&self) -> u64 {
        self.start + (Self::SIZE - 1)
    }

    pub fn classify(&self, start: u64, num_bytes: u64) -> Boundary {
        classify(start, num_bytes, self.start)
    }

    pub fn is_trailing_byte(&self, index: u64) -> bool {
        index > self.start && index <= self.last()
    }
}

/// Placement of the stdin and stdout words for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMap {
    pub stdin: DeviceWord,
    pub stdout: DeviceWord,
}

impl DeviceMap {
    pub fn new(stdin: u64, stdout: u64) -> Result<Self, MemoryError> {
        let stdin = DeviceWord::new(stdin)?;
        let stdout = DeviceWord::new(stdout)?;
        if stdin == stdout {
            return Err(MemoryError::OverlappingDeviceWords {
                address: stdin.start(),
            });
        }
        Ok(Self { stdin, stdout })
    }

    /// The CS241 MIPS convention.
    pub const fn cs241() -> Self {
        Self {
            stdin: DeviceWord { start: STDIN_WORD },
            stdout: DeviceWord { start: STDOUT_WORD },
        }
    }
}

impl Default for DeviceMap {
    fn default() -> Self {
        Self::cs241()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cs241_map() {
        let map = DeviceMap::default();
        assert_eq!(map.stdin.start(), 0xffff0004);
        assert_eq!(map.stdout.start(), 0xffff000c);
        assert_eq!(map.stdout.last(), 0xffff000f);
        assert_eq!(map, DeviceMap::new(STDIN_WORD, STDOUT_WORD).unwrap());
    }

    #[test]
    fn test_misaligned_word_rejected() {
        assert!(matches!(
            DeviceWord::new(0x102),
            Err(MemoryError::InvalidDeviceWord { address: 0x102 })
        ));
        assert!(DeviceWord::new(u64::MAX - 3).is_ok());
        assert!(DeviceMap::new(0x100, 0x105).is_err());
    }

    #[test]
    fn test_overlapping_words_rejected() {
        assert!(matches!(
            DeviceMap::new(0x100, 0x100),
            Err(MemoryError::OverlappingDeviceWords { address: 0x100 })
        ));
        // Any order and spacing is fine otherwise
        assert!(DeviceMap::new(0x200, 0x100).is_ok());
        assert!(DeviceMap::new(0x100, 0x104).is_ok());
    }

    #[test]
    fn test_trailing_bytes() {
        let word = DeviceWord::new(0x40).unwrap();
        assert!(!word.is_trailing_byte(0x40));
        assert!(word.is_trailing_byte(0x41));
        assert!(word.is_trailing_byte(0x43));
        assert!(!word.is_trailing_byte(0x44));
        assert_eq!(word.classify(0x42, 2), Boundary::Later);
    }
}
