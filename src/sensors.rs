//! Sensor polling and trigger predicates.
//!
//! [`SensorSamples`] is the point-in-time reading of every configured PIR
//! and LDR channel. It is rebuilt wholesale on each poll — never patched in
//! place — so a consumer can never observe a half-updated set. The trigger
//! predicates are pure functions over the captured samples and never
//! re-read hardware.

use heapless::Vec;

use crate::config::{MAX_CHANNELS, SensorConfig};
use crate::ports::PinIo;

/// Latest readings, index-aligned with the configured pin lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSamples {
    /// One digital reading per `pir_pins` entry. `true` = motion.
    pub pir: Vec<bool, MAX_CHANNELS>,
    /// One raw ADC reading per `ldr_pins` entry.
    pub ldr: Vec<u16, MAX_CHANNELS>,
}

impl SensorSamples {
    /// Read every configured channel and return a fresh sample set.
    ///
    /// Stateless per call; the poll cadence is the caller's job (see
    /// [`BettlichtUsermod::loop_tick`](crate::usermod::BettlichtUsermod::loop_tick)).
    /// Failed reads arrive as the port's sentinel values and are kept as-is.
    pub fn poll(config: &SensorConfig, pins: &mut impl PinIo) -> Self {
        let mut samples = Self::default();
        for &pin in &config.pir_pins {
            let _ = samples.pir.push(pins.read_digital(pin));
        }
        for &pin in &config.ldr_pins {
            let _ = samples.ldr.push(pins.read_analog(pin));
        }
        samples
    }

    /// True iff any PIR channel currently reads motion. Empty ⇒ false.
    pub fn pir_triggered(&self) -> bool {
        self.pir.iter().any(|&v| v)
    }

    /// True iff any LDR channel reads strictly below `threshold` (darker
    /// than the cutoff). A reading exactly at the threshold does not
    /// trigger. Empty ⇒ false.
    pub fn ldr_triggered(&self, threshold: u16) -> bool {
        self.ldr.iter().any(|&v| v < threshold)
    }

    /// Number of PIR channels currently reading motion (for reporting).
    pub fn pir_triggered_count(&self) -> usize {
        self.pir.iter().filter(|&&v| v).count()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pir_trigger_matches_any(values in proptest::collection::vec(any::<bool>(), 0..=MAX_CHANNELS)) {
            let mut s = SensorSamples::default();
            s.pir.extend_from_slice(&values).unwrap();
            prop_assert_eq!(s.pir_triggered(), values.iter().any(|&v| v));
        }

        #[test]
        fn ldr_trigger_matches_strict_less_than(
            values in proptest::collection::vec(0u16..=4095, 0..=MAX_CHANNELS),
            threshold in 0u16..=4095,
        ) {
            let mut s = SensorSamples::default();
            s.ldr.extend_from_slice(&values).unwrap();
            prop_assert_eq!(s.ldr_triggered(threshold), values.iter().any(|&v| v < threshold));
        }
    }
}
