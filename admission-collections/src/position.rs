//! Heap offsets stored inside queue entries.
//!
//! An entry records where it sits in the heap array, so a name lookup leads
//! straight to its slot. The largest value of the integer type is reserved
//! for "not queued", which caps how many entries a queue keyed by that type
//! can hold.

/// A heap offset with a reserved "not queued" value.
///
/// # Example
///
/// ```
/// use admission_collections::Position;
///
/// assert_eq!(u32::at(5).offset(), Some(5));
/// assert_eq!(u32::NONE.offset(), None);
/// assert_eq!(<u16 as Position>::MAX_CAPACITY, 65_535);
/// ```
pub trait Position: Copy + Eq {
    /// Marks an entry that is not in any queue.
    const NONE: Self;

    /// Largest queue capacity this type can address. Every offset below it
    /// is distinct from [`NONE`](Self::NONE).
    const MAX_CAPACITY: usize;

    /// Returns the heap offset, or `None` for the "not queued" marker.
    fn offset(self) -> Option<usize>;

    /// Returns the position for heap offset `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= MAX_CAPACITY`.
    fn at(offset: usize) -> Self;
}

macro_rules! position_impls {
    ($($ty:ty),*) => {
        $(
            impl Position for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_CAPACITY: usize = <$ty>::MAX as usize;

                #[inline]
                fn offset(self) -> Option<usize> {
                    (self != Self::NONE).then_some(self as usize)
                }

                #[inline]
                fn at(offset: usize) -> Self {
                    assert!(
                        offset < Self::MAX_CAPACITY,
                        "heap offset {offset} not addressable by {}",
                        stringify!($ty)
                    );
                    offset as Self
                }
            }
        )*
    };
}

position_impls!(u16, u32, usize);
