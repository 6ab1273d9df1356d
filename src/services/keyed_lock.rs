use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key async mutex. OTP issue/verify/reset for the same email address
/// are read-modify-write sequences on shared rows; holding the key's lock
/// across the sequence keeps concurrent requests from interleaving.
#[derive(Default)]
pub struct KeyedLock {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut map = self.inner.lock().expect("keyed lock map poisoned");
            // A guard holds a second strong reference; count 1 means the key
            // is idle and can be dropped instead of accumulating forever.
            map.retain(|_, m| Arc::strong_count(m) > 1);
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        mutex.lock_owned().await
    }
}
