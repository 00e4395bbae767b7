#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfedit::range::{format_ranges, parse_ranges};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    match parse_ranges(input) {
        Ok(ranges) => {
            // Whatever parses must render back to an equivalent list.
            let reparsed = parse_ranges(&format_ranges(&ranges)).unwrap();
            assert_eq!(ranges, reparsed);

            for range in &ranges {
                assert!(range.start >= 1);
                let selected = range.page_indices(50);
                assert!(selected.end <= 50);
            }
        }
        Err(err) => assert!(err.is_format_error()),
    }
});
