//! Classification of an access span against a 4-byte device word.

/// Relationship between a span of bytes and a device word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Straddles the edge of the word. The only case that faults.
    Crosses,
    /// Starts exactly on the first byte of the word.
    First,
    /// Starts on one of the three trailing bytes and stays inside the word.
    Later,
    /// Does not touch the word.
    Outside,
}

/// Classify `[start, start + num_bytes)` against the word starting at
/// `boundary_start`. Arithmetic saturates at the top of the address space.
pub fn classify(start: u64, num_bytes: u64, boundary_start: u64) -> Boundary {
    if num_bytes == 0 {
        return Boundary::Outside;
    }

    let end = start.saturating_add(num_bytes - 1);
    let boundary_end = boundary_start.saturating_add(3);

    if start < boundary_start {
        if end >= boundary_start {
            Boundary::Crosses
        } else {
            Boundary::Outside
        }
    } else if start <= boundary_end {
        if end > boundary_end {
            Boundary::Crosses
        } else if start == boundary_start {
            Boundary::First
        } else {
            Boundary::Later
        }
    } else {
        Boundary::Outside
    }
}
