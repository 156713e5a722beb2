#![no_main]
use libfuzzer_sys::fuzz_target;
use linkstash::ImageView;

fuzz_target!(|input: (u64, u64, &[u8])| {
    let (offset, size, data) = input;
    let view = ImageView::new(data);
    if let Ok(bytes) = view.read(offset, size) {
        assert_eq!(bytes.len() as u64, size);
    }
    if let Ok(s) = view.string_at(offset) {
        assert!(!s.contains(&0));
    }
    if let Ok(records) = view.strings_in(offset, size) {
        let total: u64 = records.iter().map(|r| r.len() as u64 + 1).sum();
        assert_eq!(total, size);
    }
});
