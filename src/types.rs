//! Core types shared across the casfs crate.

/// InodeNumber: Stable numeric identity of a filesystem node
pub type InodeNumber = u64;

/// Inode number reserved for the mounted root directory
pub const ROOT_INODE_NUMBER: InodeNumber = 1;

/// Access mask bits requested by a caller, matching the POSIX
/// `R_OK`/`W_OK`/`X_OK` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccessMask(u32);

impl AccessMask {
    pub const READ: AccessMask = AccessMask(libc::R_OK as u32);
    pub const WRITE: AccessMask = AccessMask(libc::W_OK as u32);
    pub const EXECUTE: AccessMask = AccessMask(libc::X_OK as u32);

    pub const fn from_bits(bits: u32) -> Self {
        AccessMask(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit in `self` is also set in `other`
    pub const fn is_subset_of(self, other: AccessMask) -> bool {
        self.0 & !other.0 == 0
    }

    /// Parse a mask from `rwx` letters, e.g. "rx"
    pub fn from_letters(letters: &str) -> Option<Self> {
        letters.chars().try_fold(AccessMask::default(), |mask, c| match c {
            'r' => Some(mask | AccessMask::READ),
            'w' => Some(mask | AccessMask::WRITE),
            'x' => Some(mask | AccessMask::EXECUTE),
            _ => None,
        })
    }
}

impl std::ops::BitOr for AccessMask {
    type Output = AccessMask;

    fn bitor(self, rhs: AccessMask) -> AccessMask {
        AccessMask(self.0 | rhs.0)
    }
}
