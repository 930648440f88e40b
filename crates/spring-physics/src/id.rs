//! Stable handles for world entities
//!
//! Handles are allocated from a monotonically increasing counter and never
//! reused, so a handle that outlives its entity is always detected as stale.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle to a point mass
    BodyId,
    "body"
);
handle!(
    /// Handle to a spring link
    LinkId,
    "link"
);
handle!(
    /// Handle to a pinned constant force
    ForceId,
    "force"
);
handle!(
    /// Handle to a ground plane
    GroundId,
    "ground"
);

/// Hands out fresh ids; one allocator per world.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_raw(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn body(&mut self) -> BodyId {
        BodyId(self.next_raw())
    }

    pub fn link(&mut self) -> LinkId {
        LinkId(self.next_raw())
    }

    pub fn force(&mut self) -> ForceId {
        ForceId(self.next_raw())
    }

    pub fn ground(&mut self) -> GroundId {
        GroundId(self.next_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let mut ids = IdAllocator::new();
        let a = ids.body();
        let b = ids.body();
        let l = ids.link();
        assert_ne!(a, b);
        assert_eq!(l.0, 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(LinkId(3).to_string(), "link#3");
        assert_eq!(GroundId(0).to_string(), "ground#0");
    }
}
