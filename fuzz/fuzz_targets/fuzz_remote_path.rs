#![no_main]

use libfuzzer_sys::fuzz_target;
use upsync::RemotePath;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let path = RemotePath::new(raw);
        assert_eq!(RemotePath::new(path.as_str()), path);
        let _ = path.join(raw);
        let _ = path.parent();
    }
});
