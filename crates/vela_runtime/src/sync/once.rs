/// Runs a guarded action exactly once, however many threads race to call it.
pub struct Once {
    inner: parking_lot::Once,
}

impl Once {
    pub fn new() -> Self {
        Self {
            inner: parking_lot::Once::new(),
        }
    }

    /// Runs `f` if no call has run yet; otherwise blocks until the first
    /// call has finished. Every caller observes the action's effects on
    /// return.
    pub fn call(&self, f: impl FnOnce()) {
        self.inner.call_once(f);
    }

    pub fn is_completed(&self) -> bool {
        self.inner.state().done()
    }
}

impl Default for Once {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Once {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Once")
            .field("completed", &self.is_completed())
            .finish()
    }
}
