//! Host-boundary adapters.
//!
//! Concrete implementations of the port traits in [`crate::ports`]:
//!
//! - [`gpio`] — the real ESP-IDF GPIO/ADC adapter (espidf targets only).
//! - [`sim`] — in-memory adapters for host-side tests and simulation.

#[cfg(target_os = "espidf")]
pub mod gpio;

#[cfg(not(target_os = "espidf"))]
pub mod sim;

/// Route `log` output through the ESP-IDF logging system.
/// Call once from the host's boot sequence, before any usermod logging.
#[cfg(target_os = "espidf")]
pub fn init_logging() -> anyhow::Result<()> {
    esp_idf_logger::init()?;
    Ok(())
}
