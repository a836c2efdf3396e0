//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives used by the channel table:
//!
//! - [`CriticalSectionCell`]: short, interrupt-free state updates
//! - [`ClaimCell`]: long exclusive use of a value without masking interrupts

use core::cell::RefCell;
use critical_section::Mutex;

// =============================================================================
// Critical Section Cell
// =============================================================================

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers. `Sync` whenever `T: Send`.
///
/// The critical section is global: keep closures short.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    ///
    /// Panics if called again from inside its own closure. The cell is not
    /// reentrant; use [`try_with`](Self::try_with) where nesting is possible.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

// =============================================================================
// Claim Cell
// =============================================================================

/// Why a [`ClaimCell`] could not be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClaimError {
    /// No value has been stored.
    Vacant,
    /// Another caller currently holds the value.
    Taken,
}

enum State<T> {
    Vacant,
    Free(T),
    Taken,
}

/// Optional value that one caller at a time can take out and use.
///
/// The critical section covers only moving the value out of and back into
/// the cell. While a caller runs its closure the value lives on that
/// caller's stack: interrupts stay enabled and other `ClaimCell`s remain
/// available to other threads.
///
/// A contended [`with`](Self::with) spins until the holder returns the value.
/// Claiming the same cell again from inside its own closure never returns.
pub struct ClaimCell<T> {
    state: CriticalSectionCell<State<T>>,
}

impl<T> ClaimCell<T> {
    /// Create an empty cell (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            state: CriticalSectionCell::new(State::Vacant),
        }
    }

    /// Create a cell that already holds `value`.
    pub const fn filled(value: T) -> Self {
        Self {
            state: CriticalSectionCell::new(State::Free(value)),
        }
    }

    /// Store a value in an empty cell.
    ///
    /// Hands `value` back if the cell already holds one, claimed or not.
    pub fn fill(&self, value: T) -> core::result::Result<(), T> {
        self.state.with(|state| match state {
            State::Vacant => {
                *state = State::Free(value);
                Ok(())
            }
            State::Free(_) | State::Taken => Err(value),
        })
    }

    /// Check whether a value has been stored.
    pub fn is_filled(&self) -> bool {
        self.state.with(|state| !matches!(state, State::Vacant))
    }

    /// Run `f` on the value if it is free right now.
    pub fn try_with<R, F>(&self, f: F) -> core::result::Result<R, ClaimError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut claim = self.take()?;
        match claim.value.as_mut() {
            Some(value) => Ok(f(value)),
            None => Err(ClaimError::Vacant),
        }
    }

    /// Run `f` on the value, waiting while another caller holds it.
    ///
    /// Returns `None` if the cell is empty.
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut claim = loop {
            match self.take() {
                Ok(claim) => break claim,
                Err(ClaimError::Vacant) => return None,
                Err(ClaimError::Taken) => core::hint::spin_loop(),
            }
        };
        claim.value.as_mut().map(f)
    }

    fn take(&self) -> core::result::Result<Claim<'_, T>, ClaimError> {
        self.state.with(|state| match core::mem::replace(state, State::Taken) {
            State::Free(value) => Ok(Claim {
                cell: self,
                value: Some(value),
            }),
            State::Taken => Err(ClaimError::Taken),
            State::Vacant => {
                *state = State::Vacant;
                Err(ClaimError::Vacant)
            }
        })
    }
}

impl<T> Default for ClaimCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Puts the value back on drop, including on unwind.
struct Claim<'a, T> {
    cell: &'a ClaimCell<T>,
    value: Option<T>,
}

impl<T> Drop for Claim<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.cell.state.with(|state| *state = State::Free(value));
        }
    }
}
