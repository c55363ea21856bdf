#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::{Read, Write};
use zarc::{Decoder, EncodeOptions};

fuzz_target!(|data: &[u8]| {
    let mut compressed: Vec<u8> = Vec::new();
    {
        let mut encoder = EncodeOptions::new()
            .compression_level(1)
            .into_encoder(&mut compressed)
            .unwrap();
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap();
    }

    let mut decoder = Decoder::new(compressed.as_slice()).unwrap();
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();

    assert_eq!(data, &decompressed);
});
