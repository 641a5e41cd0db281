//! Platform abstraction layer
//!
//! The simulation never touches the host directly. On the web a frame driver
//! (the page's animation callback) owns a [`web::WebSession`] and drives it;
//! natively the `asteroids` binary drives a [`crate::Session`] itself.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed derived from the host clock, for sessions nobody asked to reproduce
pub fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}
