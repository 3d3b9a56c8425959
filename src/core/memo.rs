use std::cell::OnceCell;

use crate::prelude::*;

/// Lazily computed value that is filled at most once.
///
/// The cell is not `Sync`, so a memoised owner cannot be shared across threads.
#[must_use]
pub struct Memo<T>(OnceCell<T>);

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self(OnceCell::new())
    }
}

impl<T> Memo<T> {
    /// Return the stored value, computing it with `init` on the first call.
    ///
    /// A failed `init` leaves the memo empty, so the next call retries.
    pub fn get_or_try_init(&self, init: impl FnOnce() -> Result<T>) -> Result<&T> {
        if let Some(value) = self.0.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.0.get_or_init(|| value))
    }
}
