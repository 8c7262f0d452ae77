use std::time::Duration;

/// Blocks the calling thread for a backoff delay.
pub trait Sleep: Send + Sync {
    fn sleep(&self, delay: Duration);
}

/// `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
