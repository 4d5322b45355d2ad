#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expr) = oncalendar::parse(s) {
            let displayed = expr.to_string();
            let reparsed =
                oncalendar::parse(&displayed).expect("display output must be parseable");
            assert_eq!(reparsed, expr, "roundtrip changed the expression");
            assert_eq!(displayed, reparsed.to_string(), "roundtrip idempotency failed");
        }
    }
});
