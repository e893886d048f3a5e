//! Voltage-divider unit conversions.
//!
//! The LDR sits in a divider with a known fixed resistor; the ADC samples
//! the midpoint. These helpers translate between raw ADC counts and the
//! estimated LDR resistance in ohms. Pure functions, no state.

/// Estimate the variable resistance from a raw ADC sample.
///
/// `known_resistor * (2^adc_bits / sample - 1)`.
///
/// A zero sample (shorted divider or failed read) yields `f32::INFINITY` —
/// the IEEE-754 division result, kept deliberately so callers can treat it
/// as "open circuit" rather than a panic.
pub fn resistance_from_sample(known_resistor: f32, adc_bits: u32, sample: u16) -> f32 {
    let full_scale = (1u32 << adc_bits) as f32;
    known_resistor * (full_scale / f32::from(sample) - 1.0)
}

/// Inverse of [`resistance_from_sample`]: the raw ADC sample a given
/// resistance would produce. `2^adc_bits / (resistance / known_resistor + 1)`.
pub fn sample_from_resistance(known_resistor: f32, adc_bits: u32, resistance: f32) -> f32 {
    let full_scale = (1u32 << adc_bits) as f32;
    full_scale / (resistance / known_resistor + 1.0)
}

/// Arithmetic mean of the per-sample resistances, floored to a whole ohm
/// for reporting. Returns `None` for an empty sample set.
///
/// Any zero sample in the input makes the result `f32::INFINITY` (see
/// [`resistance_from_sample`]).
pub fn average_resistance(samples: &[u16], known_resistor: f32, adc_bits: u32) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }
    let sum: f32 = samples
        .iter()
        .map(|&s| resistance_from_sample(known_resistor, adc_bits, s))
        .sum();
    Some((sum / samples.len() as f32).floor())
}
