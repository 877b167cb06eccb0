//! Typed arena handles for model blocks.
//!
//! Each handle stores `index + 1` in a `NonZeroU32`, so `Option<Handle>` costs
//! nothing extra, and variable handles cannot be used to index constraints.

use core::fmt;
use core::num::NonZeroU32;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Handle for the 0-based arena slot `index`.
            ///
            /// Slots beyond `u32::MAX - 1` saturate to the last handle.
            pub fn from_index(index: usize) -> Self {
                let raw = u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(NonZeroU32::new)
                    .unwrap_or(NonZeroU32::MAX);
                Self(raw)
            }

            pub fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "({})"), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.index())
            }
        }
    };
}

arena_id!(
    /// Handle of a variable in a model block.
    VarId,
    "var"
);

arena_id!(
    /// Handle of a constraint in a model block.
    ConId,
    "con"
);
