//! Default pin assignments and ADC characteristics.
//!
//! Single source of truth — the config defaults and the GPIO adapter
//! reference this module rather than hard-coding pin numbers. Pins are
//! runtime-configurable through the persisted config document; these are
//! only the first-boot fallbacks.

/// Default PIR motion sensor input (digital, active HIGH).
pub const PIR_GPIO: u16 = 13;

/// Default LDR light sensor input — voltage divider into ADC1.
/// GPIO 32 = ADC1 channel 4 on the classic ESP32.
pub const LDR_GPIO: u16 = 32;

/// ADC sample width. 12-bit gives raw readings of 0–4095.
pub const ADC_RESOLUTION_BITS: u32 = 12;

/// Highest raw sample the ADC can produce.
pub const ADC_MAX_SAMPLE: u16 = ((1u32 << ADC_RESOLUTION_BITS) - 1) as u16;
