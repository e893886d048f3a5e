//! Tunable sensor configuration.
//!
//! Parameters can be overridden through the host's persisted config
//! document (a flat JSON sub-object, see [`SensorConfig::to_document`]);
//! absent fields keep their current values, so a partial document never
//! clears anything.

use heapless::Vec;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::pins;

/// Fixed capacity per sensor kind. PIR and LDR channel counts are
/// independent; each may be anywhere from 0 to this many.
pub const MAX_CHANNELS: usize = 8;

/// A fixed-capacity list of GPIO numbers, one per sensor channel.
pub type PinList = Vec<u16, MAX_CHANNELS>;

/// Tunable parameters for the sensor poll and the lighting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Digital inputs, one per PIR channel.
    pub pir_pins: PinList,
    /// Analog inputs, one per LDR channel.
    pub ldr_pins: PinList,
    /// Raw ADC count below which a channel counts as "dark" (strict `<`).
    pub ldr_threshold: u16,
    /// Idle period after the last motion before the automatic shutoff.
    pub stay_on_time_ms: u32,
    /// Fixed reference resistor of the LDR voltage divider, in ohms.
    pub ldr_known_resistor_ohm: f32,
    /// Divider supply voltage. Recorded and persisted but not consumed by
    /// the resistance formula — retained for forward compatibility.
    pub ldr_voltage: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        let mut pir_pins = PinList::new();
        let _ = pir_pins.push(pins::PIR_GPIO);
        let mut ldr_pins = PinList::new();
        let _ = ldr_pins.push(pins::LDR_GPIO);
        Self {
            pir_pins,
            ldr_pins,
            ldr_threshold: 500,
            stay_on_time_ms: 60_000,
            ldr_known_resistor_ohm: 10_000.0,
            ldr_voltage: 5.0,
        }
    }
}

impl SensorConfig {
    /// Serialize to the host's persisted-config document format: pin lists
    /// as comma-joined decimal strings (empty list ⇒ empty string), the
    /// scalars as native numbers.
    pub fn to_document(&self) -> Value {
        json!({
            "pirPins": join_pin_list(&self.pir_pins),
            "ldrPins": join_pin_list(&self.ldr_pins),
            "ldrThreshold": self.ldr_threshold,
            "ldrVoltage": self.ldr_voltage,
            "ldrKnownResistor": self.ldr_known_resistor_ohm,
            "stayOnTime": self.stay_on_time_ms,
        })
    }

    /// Apply a persisted-config document on top of the current values.
    ///
    /// Every field is optional: an absent scalar keeps its current value,
    /// and a parsed pin list replaces the existing one only when it is
    /// non-empty — a blank `pirPins` entry in storage never wipes the pins
    /// configured at boot.
    pub fn apply_document(&mut self, doc: &Value) {
        if let Some(v) = doc.get("ldrThreshold").and_then(Value::as_u64) {
            self.ldr_threshold = v.min(u64::from(u16::MAX)) as u16;
        }
        if let Some(v) = doc.get("stayOnTime").and_then(Value::as_u64) {
            self.stay_on_time_ms = v.min(u64::from(u32::MAX)) as u32;
        }
        if let Some(v) = doc.get("ldrKnownResistor").and_then(Value::as_f64) {
            self.ldr_known_resistor_ohm = v as f32;
        }
        if let Some(v) = doc.get("ldrVoltage").and_then(Value::as_f64) {
            self.ldr_voltage = v as f32;
        }
        if let Some(s) = doc.get("pirPins").and_then(Value::as_str) {
            let parsed = parse_pin_list(s, "pirPins");
            if !parsed.is_empty() {
                self.pir_pins = parsed;
            }
        }
        if let Some(s) = doc.get("ldrPins").and_then(Value::as_str) {
            let parsed = parse_pin_list(s, "ldrPins");
            if !parsed.is_empty() {
                self.ldr_pins = parsed;
            }
        }
    }
}

fn join_pin_list(pins: &PinList) -> String {
    let mut out = String::new();
    for (i, pin) in pins.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&pin.to_string());
    }
    out
}

/// Parse a comma-joined pin list. A malformed token degrades to pin 0 with
/// a logged warning instead of failing the whole load; entries beyond
/// [`MAX_CHANNELS`] are dropped with a warning.
fn parse_pin_list(raw: &str, field: &str) -> PinList {
    let mut pins = PinList::new();
    if raw.trim().is_empty() {
        return pins;
    }
    for token in raw.split(',') {
        let pin = token.trim().parse::<u16>().unwrap_or_else(|_| {
            warn!("config: malformed {field} entry {token:?}, using pin 0");
            0
        });
        if pins.push(pin).is_err() {
            warn!("config: {field} has more than {MAX_CHANNELS} entries, rest ignored");
            break;
        }
    }
    pins
}
