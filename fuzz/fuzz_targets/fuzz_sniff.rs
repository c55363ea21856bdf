#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Read;
use zarc::{ArchiveKind, Decoder, sniff_reader};

fuzz_target!(|data: &[u8]| {
    let kind = sniff_reader(data);

    // Nothing decodes, so nothing can be a tar stream
    let mut first = [0u8; 1];
    let empty = Decoder::new(data)
        .and_then(|mut d| Ok(d.decompress(&mut first)? == 0))
        .unwrap_or(true);
    if empty {
        assert_eq!(kind, ArchiveKind::Bare);
    }

    let _ = Decoder::new(data).map(|mut d| d.read_to_end(&mut Vec::new()));
});
