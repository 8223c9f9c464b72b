//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gymapp_core` linkage and
//!   schema bootstrap without any UI host.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("gymapp_core version={}", gymapp_core::core_version());

    match gymapp_core::db::open_db_in_memory() {
        Ok(_) => println!("gymapp_core schema=ok"),
        Err(err) => println!("gymapp_core schema=error {err}"),
    }
}
