//! Mutual exclusion over a shared expander device.
//!
//! Every pin handle of a device funnels its register transactions through one
//! `BusMutex`, so a row commit is never interleaved with another transaction
//! on the same device.

use core::cell::RefCell;

/// Lock primitive guarding the state of one device.
pub trait BusMutex<T> {
    /// Wrap a value.
    fn create(value: T) -> Self;

    /// Run `f` with exclusive access to the value.
    fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    /// Exclusive access through a unique borrow, without locking.
    fn get_mut(&mut self) -> &mut T;

    /// Unwrap the value.
    fn into_inner(self) -> T;
}

/// Single-context sharing. Panics on re-entrant use, which the driver never does.
impl<T> BusMutex<T> for RefCell<T> {
    fn create(value: T) -> Self {
        RefCell::new(value)
    }

    fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn get_mut(&mut self) -> &mut T {
        RefCell::get_mut(self)
    }

    fn into_inner(self) -> T {
        RefCell::into_inner(self)
    }
}

/// Cross-thread sharing. A poisoned lock is recovered: the cached row state
/// is only ever mutated together with its register write.
#[cfg(feature = "std")]
impl<T> BusMutex<T> for std::sync::Mutex<T> {
    fn create(value: T) -> Self {
        std::sync::Mutex::new(value)
    }

    fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = std::sync::Mutex::lock(self).unwrap_or_else(|e| e.into_inner());
        f(&mut *guard)
    }

    fn get_mut(&mut self) -> &mut T {
        std::sync::Mutex::get_mut(self).unwrap_or_else(|e| e.into_inner())
    }

    fn into_inner(self) -> T {
        std::sync::Mutex::into_inner(self).unwrap_or_else(|e| e.into_inner())
    }
}

/// Mutex used when none is named: `std::sync::Mutex` with `std`, `RefCell`
/// otherwise.
#[cfg(feature = "std")]
pub type DefaultMutex<T> = std::sync::Mutex<T>;

/// Mutex used when none is named: `std::sync::Mutex` with `std`, `RefCell`
/// otherwise.
#[cfg(not(feature = "std"))]
pub type DefaultMutex<T> = RefCell<T>;

#[cfg(test)]
mod tests {
    use super::*;

    fn bump<M: BusMutex<u32>>(m: &M) -> u32 {
        m.lock(|v| {
            *v += 1;
            *v
        })
    }

    #[test]
    fn test_refcell_mutex() {
        let mut m = <RefCell<u32> as BusMutex<u32>>::create(1);
        assert_eq!(bump(&m), 2);
        *BusMutex::get_mut(&mut m) += 10;
        assert_eq!(BusMutex::into_inner(m), 12);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_std_mutex() {
        let m = <std::sync::Mutex<u32> as BusMutex<u32>>::create(0);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        bump(&m);
                    }
                });
            }
        });
        assert_eq!(BusMutex::into_inner(m), 400);
    }
}
