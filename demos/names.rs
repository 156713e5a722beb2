// Registers three names from different kinds of call sites and prints what
// the linker collected.
//
// Usage: cargo run --example names [section] [path]

use linkstash::logging::init_tracing;
use linkstash::store;

// Never called; the record is still linked in as long as the function is.
fn f() -> &'static [u8] {
    store!("names", "alice")
}

#[inline]
fn g() -> &'static [u8] {
    store!("names", "bob")
}

fn h<T>() -> &'static [u8] {
    store!("names", "charlie")
}

fn main() {
    init_tracing();

    // Keep all three call sites reachable.
    let sites: [fn() -> &'static [u8]; 3] = [f, g, h::<()>];
    std::hint::black_box(&sites);

    let mut args = std::env::args().skip(1);
    let section = args.next().unwrap_or_else(|| "names".to_string());
    let result = match args.next() {
        Some(path) => linkstash::fetch_from(&section, path),
        None => linkstash::fetch(&section),
    };

    match result {
        Ok(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
