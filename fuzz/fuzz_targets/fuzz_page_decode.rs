#![no_main]
use libfuzzer_sys::fuzz_target;
use xtc_rs::Page;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode cleanly or error, never panic
    if let Ok(page) = Page::from_bytes(data) {
        // A page that decoded must re-encode to a decodable record
        let bytes = page.to_bytes();
        let again = Page::from_bytes(&bytes).expect("re-encoded page must decode");
        assert_eq!(again, page);
    }
});
