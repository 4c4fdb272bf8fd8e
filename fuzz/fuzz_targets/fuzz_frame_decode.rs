//! Fuzz target: `Frame::decode`
//!
//! Drives arbitrary byte sequences into the relay payload decoder and
//! asserts that it never panics, and that anything it accepts encodes
//! back to a form it decodes identically.
//!
//! cargo fuzz run fuzz_frame_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use tuio::events::Frame;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = Frame::decode(data) {
        assert!(frame.tag.len() + frame.args.len() <= data.len());
        let bytes = frame.encode().expect("decoded frame must re-encode");
        assert_eq!(Frame::decode(&bytes).expect("re-encoded frame must decode"), frame);
    }
});
