#![no_main]
use libfuzzer_sys::fuzz_target;
use linkstash::{FetchConfig, ImageView, ObjectFormat};

fuzz_target!(|data: &[u8]| {
    let _ = ObjectFormat::MachO.scan(&ImageView::new(data), "names", &FetchConfig::default());
});
