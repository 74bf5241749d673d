use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error(
        "Access violation at address 0x{location:08x} ({num_bytes} bytes, {})",
        direction(.was_read)
    )]
    AccessViolation {
        location: u64,
        num_bytes: u64,
        was_read: bool,
    },

    #[error(
        "Segmentation fault at address 0x{location:08x} ({num_bytes} bytes, {})",
        direction(.was_read)
    )]
    SegmentationFault {
        location: u64,
        num_bytes: u64,
        was_read: bool,
    },

    #[error("Stream error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Invalid device word: address 0x{address:x} is not a 4-byte aligned word")]
    InvalidDeviceWord { address: u64 },

    #[error("Overlapping device words at address 0x{address:x}")]
    OverlappingDeviceWords { address: u64 },
}

impl MemoryError {
    pub fn access_violation(location: u64, num_bytes: u64, was_read: bool) -> Self {
        Self::AccessViolation {
            location,
            num_bytes,
            was_read,
        }
    }

    pub fn segfault(location: u64, num_bytes: u64, was_read: bool) -> Self {
        Self::SegmentationFault {
            location,
            num_bytes,
            was_read,
        }
    }
}

fn direction(was_read: &bool) -> &'static str {
    if *was_read { "read" } else { "write" }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Program of {program_len} bytes does not fit in {memory_size} bytes of memory")]
    ProgramTooLarge { program_len: usize, memory_size: u32 },

    #[error(
        "Array of {len} words at 0x{location:x} does not fit in {memory_size} bytes of memory"
    )]
    ArrayTooLarge {
        location: u32,
        len: usize,
        memory_size: u32,
    },

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_violation_display() {
        let err = MemoryError::access_violation(0xffff0005, 4, true);
        let msg = err.to_string();
        assert!(msg.contains("0xffff0005"));
        assert!(msg.contains("4 bytes"));
        assert!(msg.contains("read"));

        let err = MemoryError::access_violation(0x10, 3, false);
        assert!(err.to_string().contains("write"));
    }

    #[test]
    fn test_stream_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = MemoryError::from(io);
        match err {
            MemoryError::Stream(inner) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::BrokenPipe);
                assert_eq!(inner.to_string(), "pipe closed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_session_error_wraps_memory_error() {
        let err: SessionError = MemoryError::segfault(0x800, 4, false).into();
        assert!(err.to_string().contains("Segmentation fault at address 0x00000800"));
    }
}
