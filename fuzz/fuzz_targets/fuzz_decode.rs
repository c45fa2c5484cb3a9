#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbitplane::{DecodeRequest, MonoPacking};

fuzz_target!(|data: &[u8]| {
    // Both 1-bpp layouts; must never panic
    let _ = zenbitplane::decode(data);
    let _ = DecodeRequest::new(data)
        .with_mono_packing(MonoPacking::Packed)
        .decode(enough::Unstoppable);

    // Geometry on whatever decoded must keep the plane consistent
    if let Ok(mut image) = zenbitplane::decode(data) {
        let (w, h) = (image.width(), image.height());
        image.flip_horizontal();
        if image.rotate(1).is_ok() {
            assert_eq!((image.width(), image.height()), (h, w));
        }
        assert_eq!(image.pixels().len(), w * h);
    }
});
