#![no_main]
use libfuzzer_sys::fuzz_target;

use rawhttp::http11::{decode_text, parse_header_map, parse_response, END_OF_HEADER};

fuzz_target!(|data: &[u8]| {
    let raw = match decode_text(data.to_vec()) {
        Ok(v) => v,
        Err(_) => return,
    };

    if let Ok((_, header, body)) = parse_response(&raw) {
        // the split must be lossless.
        assert_eq!(format!("{}{}{}", header, END_OF_HEADER, body), raw);
        assert!(!header.contains(END_OF_HEADER));

        parse_header_map(header).ok();
    }
});
