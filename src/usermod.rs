//! The usermod surface the host runtime drives.
//!
//! [`BettlichtUsermod`] wires the sensor reader, trigger predicates, and
//! lighting engine behind the host's lifecycle callbacks and JSON document
//! contracts. The host calls `setup` once at boot, `loop_tick` continuously,
//! and the `*_json_*` / `*_config` methods whenever its state, info, or
//! persisted-config documents are exchanged.
//!
//! Single-threaded and cooperative: nothing here blocks, and between polls
//! `loop_tick` is a cheap timestamp comparison. Config load/save happens
//! only at lifecycle points, never inside the tick path.

use log::info;
use serde_json::{Map, Value, json};

use crate::config::SensorConfig;
use crate::engine::LightingEngine;
use crate::pins::ADC_RESOLUTION_BITS;
use crate::ports::{LightOutput, PinIo, PinMode};
use crate::sensors::SensorSamples;
use crate::units;

/// Minimum interval between sensor polls. Calls inside the window no-op.
pub const POLL_INTERVAL_MS: u64 = 300;

/// Key of this usermod's sub-object in the host's persisted config document.
pub const CONFIG_KEY: &str = "bettlicht";

/// Presence- and light-driven automatic lighting usermod.
pub struct BettlichtUsermod {
    config: SensorConfig,
    samples: SensorSamples,
    engine: LightingEngine,
    last_poll_ms: u64,
}

impl BettlichtUsermod {
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            samples: SensorSamples::default(),
            engine: LightingEngine::new(),
            last_poll_ms: 0,
        }
    }

    /// Live configuration (read-only; mutate via [`read_from_config`](Self::read_from_config)).
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Most recent sample set.
    pub fn samples(&self) -> &SensorSamples {
        &self.samples
    }

    /// Lighting-rule bookkeeping.
    pub fn engine(&self) -> &LightingEngine {
        &self.engine
    }

    // ── Lifecycle callbacks ───────────────────────────────────

    /// Called once at boot, before the network is up. Configures every PIR
    /// pin as a digital input. LDR pins are ADC inputs and need no mode.
    pub fn setup(&mut self, pins: &mut impl PinIo) {
        for &pin in &self.config.pir_pins {
            pins.set_pin_mode(pin, PinMode::Input);
        }
        info!(
            "bettlicht: {} PIR / {} LDR channels, threshold {}, stay-on {} ms",
            self.config.pir_pins.len(),
            self.config.ldr_pins.len(),
            self.config.ldr_threshold,
            self.config.stay_on_time_ms,
        );
    }

    /// Called every time the network is (re)connected. Reserved.
    pub fn connected(&mut self) {}

    /// Called continuously by the host loop. Polls the sensors and runs the
    /// lighting rule at most once per [`POLL_INTERVAL_MS`].
    pub fn loop_tick(&mut self, now_ms: u64, pins: &mut impl PinIo, out: &mut impl LightOutput) {
        if now_ms.saturating_sub(self.last_poll_ms) <= POLL_INTERVAL_MS {
            return;
        }
        self.last_poll_ms = now_ms;

        self.samples = SensorSamples::poll(&self.config, pins);
        self.engine
            .evaluate(&self.samples, &self.config, now_ms, out);
    }

    // ── State document (read/write via the host's JSON state API) ──

    /// Publish sensor readings and rule state under a `sensors` object.
    pub fn add_to_json_state(&self, root: &mut Map<String, Value>) {
        let mut sensors = Map::new();
        sensors.insert("pir".into(), json!(self.samples.pir));
        sensors.insert("ldr".into(), json!(self.samples.ldr));
        sensors.insert(
            "lastPirTriggeredTime".into(),
            json!(self.engine.last_pir_triggered_ms),
        );
        sensors.insert("lastOnManual".into(), json!(self.engine.last_on_manual));
        sensors.insert("ldrThreshold".into(), json!(self.config.ldr_threshold));
        sensors.insert("stayOnTime".into(), json!(self.config.stay_on_time_ms));
        root.insert("sensors".into(), Value::Object(sensors));
    }

    /// Consume a client-written state document. A top-level `"on": true`
    /// marks the current on-state as manual, suspending the auto-shutoff.
    pub fn read_from_json_state(&mut self, root: &Map<String, Value>) {
        if root.get("on").and_then(Value::as_bool) == Some(true) {
            self.engine.note_manual_on();
        }
    }

    // ── Info document ─────────────────────────────────────────

    /// Publish human-readable entries under the info document's `u` object.
    ///
    /// The average-resistance entry is omitted while no LDR channel is
    /// configured (there is nothing meaningful to average). A zero raw
    /// sample makes the average infinite, which saturates to `u64::MAX`
    /// in the report — effectively "open circuit".
    pub fn add_to_json_info(&self, root: &mut Map<String, Value>) {
        let user = root
            .entry("u")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(user) = user else { return };

        if let Some(avg) = units::average_resistance(
            &self.samples.ldr,
            self.config.ldr_known_resistor_ohm,
            ADC_RESOLUTION_BITS,
        ) {
            user.insert("Average LDR voltage".into(), json!([avg as u64, " Ω"]));
        }
        user.insert(
            "PIR".into(),
            json!([self.samples.pir_triggered_count(), " ch triggered"]),
        );
    }

    // ── Persisted config document ─────────────────────────────

    /// Write this usermod's settings under [`CONFIG_KEY`]. Called by the
    /// host whenever settings are saved to storage.
    pub fn add_to_config(&self, root: &mut Map<String, Value>) {
        root.insert(CONFIG_KEY.into(), self.config.to_document());
    }

    /// Load settings from the persisted config document. Called once at
    /// boot, before `setup`, so pin assignments take effect. All fields
    /// are optional; see [`SensorConfig::apply_document`].
    pub fn read_from_config(&mut self, root: &Map<String, Value>) {
        if let Some(doc) = root.get(CONFIG_KEY) {
            self.config.apply_document(doc);
        }
    }
}

impl Default for BettlichtUsermod {
    fn default() -> Self {
        Self::new(SensorConfig::default())
    }
}
