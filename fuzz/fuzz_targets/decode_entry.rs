#![no_main]

use libfuzzer_sys::fuzz_target;
use weft_core::timeline::TimelineEntry;
use weft_core::validate::validate_entry;

fuzz_target!(|data: &[u8]| {
    if let Ok(entry) = serde_json::from_slice::<TimelineEntry>(data) {
        let _ = validate_entry(&entry, 0);
        let _ = entry.kind.to_string();
    }
});
