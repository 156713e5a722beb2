#![no_main]
use libfuzzer_sys::fuzz_target;
use linkstash::{FetchConfig, ImageView, ObjectFormat};

fuzz_target!(|data: &[u8]| {
    let view = ImageView::new(data);
    let _ = ObjectFormat::Elf.scan(&view, "names", &FetchConfig::default());
    let _ = ObjectFormat::Elf.scan(&view, ".shstrtab", &FetchConfig::default());
});
