#![no_main]
use libfuzzer_sys::fuzz_target;
use xtc_rs::Archive;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must parse cleanly or error, never panic
    if let Ok(archive) = Archive::from_bytes(data) {
        // Anything that parsed must survive a rebuild cycle
        let bytes = archive.to_bytes().expect("parsed archive must serialize");
        let again = Archive::from_bytes(&bytes).expect("rebuilt archive must parse");
        assert_eq!(again.pages, archive.pages);
        assert_eq!(again.read_direction, archive.read_direction);
    }
});
