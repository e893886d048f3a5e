//! Lighting decision engine.
//!
//! Two logical states, Off and On, with On sub-tagged manual/automatic:
//!
//! ```text
//!              pir && dark
//!    ┌─ Off ───────────────────▶ On (automatic)
//!    │                               │
//!    │   idle > stay_on_time         │
//!    ◀───────────────────────────────┘
//!
//!    On (manual): automatic shutoff suspended until the light is turned
//!    off externally and the next automatic cycle begins.
//! ```
//!
//! The engine only ever applies brightness changes with
//! [`Notify::Silent`] — internally-driven transitions must not re-trigger
//! the host's notification subscribers.

use log::{debug, info};

use crate::config::SensorConfig;
use crate::ports::{LightOutput, Notify};
use crate::sensors::SensorSamples;

/// Automatic-control bookkeeping. Brightness itself is host-owned and
/// accessed through the [`LightOutput`] port.
#[derive(Debug, Clone, Default)]
pub struct LightingEngine {
    /// True if the current "on" state was caused by a manual command.
    /// While set, the idle-timeout rule never fires.
    pub last_on_manual: bool,
    /// Timestamp (ms since boot) of the most recent tick with motion.
    pub last_pir_triggered_ms: u64,
}

impl LightingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an externally-issued "on" command. Edge-triggered from the
    /// state-document consumer, independent of the poll cycle.
    pub fn note_manual_on(&mut self) {
        if !self.last_on_manual {
            debug!("manual on — automatic shutoff suspended");
        }
        self.last_on_manual = true;
    }

    /// Evaluate one poll tick.
    ///
    /// Order matters: the motion timestamp is refreshed first (regardless
    /// of any transition), then the on-rule, then the off-rule. `is_on` is
    /// captured once before either rule, so the two transitions are
    /// mutually exclusive within a tick.
    pub fn evaluate(
        &mut self,
        samples: &SensorSamples,
        config: &SensorConfig,
        now_ms: u64,
        out: &mut impl LightOutput,
    ) {
        if samples.pir_triggered() {
            self.last_pir_triggered_ms = now_ms;
        }

        let is_on = out.brightness() != 0;

        // Turn on iff: currently off, motion detected, and it is dark.
        if !is_on && samples.pir_triggered() && samples.ldr_triggered(config.ldr_threshold) {
            self.last_on_manual = false;
            let level = out.last_brightness();
            out.set_brightness(level, Notify::Silent);
            info!("auto-on: restoring brightness {level}");
        }

        // Turn off iff: currently on, last turned on automatically, and no
        // motion for longer than the stay-on time (strictly longer — an
        // elapsed time exactly equal to the timeout does not fire).
        if is_on
            && !self.last_on_manual
            && now_ms.saturating_sub(self.last_pir_triggered_ms) > u64::from(config.stay_on_time_ms)
        {
            out.set_last_brightness(out.brightness());
            out.set_brightness(0, Notify::Silent);
            info!(
                "auto-off: no motion for {} ms",
                now_ms.saturating_sub(self.last_pir_triggered_ms)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::SimLight;

    fn samples(pir: bool, ldr: u16) -> SensorSamples {
        let mut s = SensorSamples::default();
        s.pir.push(pir).unwrap();
        s.ldr.push(ldr).unwrap();
        s
    }

    fn dark_with_motion() -> SensorSamples {
        samples(true, 300)
    }

    #[test]
    fn turns_on_when_dark_and_motion() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&dark_with_motion(), &config, 1_000, &mut light);

        assert_eq!(light.brightness, 128);
        assert!(!engine.last_on_manual);
        assert_eq!(engine.last_pir_triggered_ms, 1_000);
    }

    #[test]
    fn stays_off_when_bright() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&samples(true, 4_000), &config, 1_000, &mut light);
        assert_eq!(light.brightness, 0);
    }

    #[test]
    fn stays_off_without_motion() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&samples(false, 300), &config, 1_000, &mut light);
        assert_eq!(light.brightness, 0);
    }

    #[test]
    fn turns_off_after_idle_timeout() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::on_at(200);
        engine.last_pir_triggered_ms = 1_000;

        let now = 1_000 + u64::from(config.stay_on_time_ms) + 1;
        engine.evaluate(&samples(false, 4_000), &config, now, &mut light);

        assert_eq!(light.brightness, 0);
        assert_eq!(light.last_brightness, 200);
    }

    #[test]
    fn idle_time_exactly_at_timeout_does_not_fire() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::on_at(200);
        engine.last_pir_triggered_ms = 1_000;

        let now = 1_000 + u64::from(config.stay_on_time_ms);
        engine.evaluate(&samples(false, 4_000), &config, now, &mut light);
        assert_eq!(light.brightness, 200);
    }

    #[test]
    fn manual_on_blocks_automatic_shutoff() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        engine.note_manual_on();
        let mut light = SimLight::on_at(200);

        // Arbitrarily large idle time — manual is a sink for the off rule.
        engine.evaluate(&samples(false, 4_000), &config, u64::MAX / 2, &mut light);
        assert_eq!(light.brightness, 200);
    }

    #[test]
    fn automatic_on_clears_manual_flag() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        engine.note_manual_on();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&dark_with_motion(), &config, 1_000, &mut light);
        assert!(!engine.last_on_manual);
        assert_eq!(light.brightness, 128);
    }

    #[test]
    fn motion_while_on_postpones_shutoff() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::on_at(200);
        engine.last_pir_triggered_ms = 0;

        // Motion arrives on the same tick the timeout would have expired.
        let now = u64::from(config.stay_on_time_ms) + 1;
        engine.evaluate(&samples(true, 4_000), &config, now, &mut light);
        assert_eq!(light.brightness, 200);
        assert_eq!(engine.last_pir_triggered_ms, now);
    }

    #[test]
    fn on_and_off_never_both_fire_in_one_tick() {
        // Dark + motion turns the light on; the stale timeout from a long
        // motionless stretch must not immediately turn it back off.
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        let now = u64::from(config.stay_on_time_ms) * 10;
        engine.evaluate(&dark_with_motion(), &config, now, &mut light);
        assert_eq!(light.brightness, 128);
    }

    #[test]
    fn engine_changes_are_silent() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&dark_with_motion(), &config, 1_000, &mut light);
        assert!(
            light
                .changes
                .iter()
                .all(|&(_, notify)| notify == Notify::Silent)
        );
    }

    #[test]
    fn empty_sample_set_is_a_no_op() {
        let config = SensorConfig::default();
        let mut engine = LightingEngine::new();
        let mut light = SimLight::off_with_last(128);

        engine.evaluate(&SensorSamples::default(), &config, 1_000, &mut light);
        assert_eq!(light.brightness, 0);
        assert_eq!(engine.last_pir_triggered_ms, 0);
    }
}
