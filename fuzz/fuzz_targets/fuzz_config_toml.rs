#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and resolution must report errors, never panic
        if let Ok((layer, _warnings)) =
            upsync::config::parse_layer(content, Path::new("upsync.toml"))
        {
            let _ = layer.resolve();
        }
    }
});
