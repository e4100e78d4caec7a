#![no_main]

use libfuzzer_sys::fuzz_target;
use weft_core::compact::compact_timeline;
use weft_core::timeline::TimelineEntry;

fuzz_target!(|data: &[u8]| {
    let Ok(mut timeline) = serde_json::from_slice::<Vec<TimelineEntry>>(data) else {
        return;
    };
    let now = timeline.last().map_or(0, |e| e.created_unix);
    let before = timeline.clone();

    match compact_timeline(&mut timeline, now) {
        Ok(report) => {
            assert!(timeline.len() <= before.len());
            assert_eq!(report.entries_out, timeline.len());
        }
        Err(_) => assert_eq!(timeline, before),
    }
});
