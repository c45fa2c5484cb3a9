#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbitplane::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical images
    for packing in [MonoPacking::Unpacked, MonoPacking::Packed] {
        let Ok(decoded) = DecodeRequest::new(data)
            .with_mono_packing(packing)
            .decode(enough::Unstoppable)
        else {
            continue;
        };

        let reencoded = decoded.encode().expect("decoded image failed to encode");
        assert_eq!(reencoded.len(), decoded.header().file_size() as usize);

        let Ok(decoded2) = DecodeRequest::new(&reencoded)
            .with_mono_packing(packing)
            .decode(enough::Unstoppable)
        else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
        assert_eq!(decoded, decoded2);
    }
});
