#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Never panics, only Ok or Err; the rich rendering must cope with any span.
        if let Err(e) = oncalendar::parse(s) {
            let _ = e.display_rich();
        }
        let _ = oncalendar::is_valid(s);
    }
});
