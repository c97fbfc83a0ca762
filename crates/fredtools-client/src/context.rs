//! Per-thread "current client".
//!
//! Entity convenience constructors such as `Series::get` read the client from
//! here so callers do not have to thread it through every call. Every
//! operation that does I/O also accepts an explicit [`FredClient`], which is
//! the preferred form in library code.

use std::cell::RefCell;

use fredtools_types::{FredError, Result};

use crate::FredClient;

thread_local! {
    static CURRENT: RefCell<Option<FredClient>> = const { RefCell::new(None) };
}

/// Registers `client` as the current client of this thread.
pub fn set_default_client(client: FredClient) {
    CURRENT.with(|slot| *slot.borrow_mut() = Some(client));
}

/// Clears the current client of this thread, returning it.
pub fn clear_default_client() -> Option<FredClient> {
    CURRENT.with(|slot| slot.borrow_mut().take())
}

/// Returns the current client of this thread.
///
/// # Errors
///
/// Returns [`FredError::NoCurrentClient`] if none was ever registered.
pub fn current_client() -> Result<FredClient> {
    CURRENT.with(|slot| slot.borrow().clone().ok_or(FredError::NoCurrentClient))
}

/// Makes `client` current until the returned guard is dropped.
///
/// The previous client (or its absence) is restored on drop, including when
/// the scope is left through `?` or a panic.
#[must_use = "the override ends as soon as the guard is dropped"]
pub fn use_client(client: FredClient) -> ClientGuard {
    let previous = CURRENT.with(|slot| slot.borrow_mut().replace(client));
    ClientGuard { previous }
}

/// Runs `f` with `client` as the current client.
pub fn with_client<R>(client: FredClient, f: impl FnOnce() -> R) -> R {
    let _guard = use_client(client);
    f()
}

/// Restores the previous current client when dropped.
#[derive(Debug)]
pub struct ClientGuard {
    previous: Option<FredClient>,
}

impl Drop for ClientGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}
