#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Deeply nested or truncated input must surface as an error.
    if let Ok(nodes) = locksmith_lib::asn1::parse_all(data) {
        for node in &nodes {
            let _ = node.kind_name();
            let _ = node.as_sequence();
            let _ = node.as_integer().map(|i| i.to_decimal());
            if let Ok(tagged) = node.as_tagged() {
                let _ = tagged.implicit_items();
                let _ = tagged.implicit_bit_string();
                let _ = tagged.implicit_time();
            }
        }
    }
});
