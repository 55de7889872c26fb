#![no_main]

use libfuzzer_sys::fuzz_target;
use locksmith_lib::{EnglishResources, ExtensionDecoder};

fuzz_target!(|data: &[u8]| {
    // Parsing and decoding must never panic, regardless of input.
    if let Ok(cert) = locksmith_lib::parse_cert(data) {
        let _ = cert.fingerprint();
        let _ = cert.to_pem();
        let _ = cert.subject.to_oneline();
        let _ = cert.not_after.to_openssl();

        let summary = locksmith_lib::summarize(&cert, &EnglishResources);
        let _ = locksmith_lib::display_text(&summary);
        let _ = locksmith_lib::to_json(&summary);

        let _ = locksmith_lib::order(std::slice::from_ref(&cert));
        let _ = ExtensionDecoder::new(&EnglishResources).decode_all(&cert.extensions);
    }
});
