#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // A corrupt deploy cache is dropped, never a panic
        if let Ok(cache) = upsync::infrastructure::cache::parse_cache(content) {
            for (_, hash) in cache.entries() {
                assert!(hash.is_well_formed());
            }
        }
    }
});
