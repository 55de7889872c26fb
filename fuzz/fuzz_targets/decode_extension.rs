#![no_main]

use libfuzzer_sys::fuzz_target;
use locksmith_lib::extensions::REGISTRY;
use locksmith_lib::EnglishResources;

fuzz_target!(|data: &[u8]| {
    // The first byte picks a registered extension; the rest is its value.
    let Some((&selector, value)) = data.split_first() else {
        return;
    };
    if REGISTRY.is_empty() {
        return;
    }
    let Some(entry) = REGISTRY.get(usize::from(selector) % REGISTRY.len()) else {
        return;
    };
    let _ = locksmith_lib::decode_extension(entry.oid, value, &EnglishResources);
});
