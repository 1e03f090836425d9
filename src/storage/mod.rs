use crate::models::SavedProfile;
use serde::{Deserialize, Serialize};

pub(crate) const PROFILE_KEY: &str = "newsprefs_profile";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring unreadable {key} in localStorage: {e}");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn load_profile() -> SavedProfile {
    load_json_from_storage::<SavedProfile>(PROFILE_KEY).unwrap_or_default()
}

pub(crate) fn save_profile(profile: &SavedProfile) {
    save_json_to_storage(PROFILE_KEY, profile);
}

pub(crate) fn clear_profile() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(PROFILE_KEY);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::DetailLevel;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_profile_storage_roundtrip() {
        clear_profile();
        assert_eq!(load_profile(), SavedProfile::default());

        let profile = SavedProfile {
            topics: vec!["Sports".to_string()],
            detail_levels: vec![DetailLevel::InDepth],
            ..Default::default()
        };
        save_profile(&profile);
        assert_eq!(load_profile(), profile);

        clear_profile();
        assert!(load_profile().topics.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_profile_falls_back_to_default() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(PROFILE_KEY, "{not json");
        }
        assert_eq!(load_profile(), SavedProfile::default());
        clear_profile();
    }
}
