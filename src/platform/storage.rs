//! Key/value persistence
//!
//! LocalStorage in the browser. Native builds have no backing store: reads
//! find nothing and writes are dropped.

use serde::Serialize;

/// Serialize `value` as JSON under `key`. Returns false if nothing was stored.
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => write(key, &json),
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Raw string stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn write(key: &str, value: &str) -> bool {
    let Some(storage) = local_storage() else {
        log::warn!("LocalStorage unavailable, {} not saved", key);
        return false;
    };
    storage.set_item(key, value).is_ok()
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn read(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write(_key: &str, _value: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_native_storage_is_empty() {
        assert!(!save_json("block_blast_test", &vec![1, 2, 3]));
        assert_eq!(read("block_blast_test"), None);
    }
}
