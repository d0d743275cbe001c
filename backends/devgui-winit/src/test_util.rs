pub(crate) mod test_sync {
    use std::sync::{Mutex, OnceLock};

    // ImGui allows one live context per process, so tests that create one
    // must not overlap.
    static CTX_TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

    pub fn lock_context() -> std::sync::MutexGuard<'static, ()> {
        CTX_TEST_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .expect("test context mutex poisoned")
    }
}
