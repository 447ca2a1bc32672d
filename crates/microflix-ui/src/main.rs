#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Microflix UI wasm entry point and native stub fallback.

#[cfg(target_arch = "wasm32")]
fn main() {
    microflix_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), std::io::Error> {
    use std::io::{self, Write};

    let mut stderr = io::stderr().lock();
    stderr.write_all(
        b"microflix-ui runs in the browser; build it for wasm32-unknown-unknown (for example with `trunk build`).\n",
    )?;
    Ok(())
}
