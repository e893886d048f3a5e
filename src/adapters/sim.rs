//! In-memory simulation adapters for host-side tests.
//!
//! [`SimPinIo`] backs pin reads with plain maps; unmapped pins return the
//! same sentinels a failed hardware read would (`false` / `0`), so tests
//! exercise the degraded path for free. [`SimLight`] records every
//! brightness change together with its notification mode.

use std::collections::HashMap;

use crate::ports::{LightOutput, Notify, PinIo, PinMode};

/// Scriptable pin I/O: set the values a test wants the sensors to see.
#[derive(Debug, Default)]
pub struct SimPinIo {
    digital: HashMap<u16, bool>,
    analog: HashMap<u16, u16>,
    modes: HashMap<u16, PinMode>,
}

impl SimPinIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a digital level for `pin`.
    pub fn set_digital(&mut self, pin: u16, level: bool) {
        self.digital.insert(pin, level);
    }

    /// Script a raw ADC sample for `pin`.
    pub fn set_analog(&mut self, pin: u16, sample: u16) {
        self.analog.insert(pin, sample);
    }

    /// The mode `set_pin_mode` last configured for `pin`, if any.
    pub fn mode_of(&self, pin: u16) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }
}

impl PinIo for SimPinIo {
    fn set_pin_mode(&mut self, pin: u16, mode: PinMode) {
        self.modes.insert(pin, mode);
    }

    fn read_digital(&mut self, pin: u16) -> bool {
        self.digital.get(&pin).copied().unwrap_or(false)
    }

    fn read_analog(&mut self, pin: u16) -> u16 {
        self.analog.get(&pin).copied().unwrap_or(0)
    }
}

/// Recording stand-in for the host-owned brightness state.
#[derive(Debug)]
pub struct SimLight {
    pub brightness: u8,
    pub last_brightness: u8,
    /// Every `set_brightness` call, in order.
    pub changes: Vec<(u8, Notify)>,
}

impl SimLight {
    /// Light off, with `last` as the level to restore on turn-on.
    pub fn off_with_last(last: u8) -> Self {
        Self {
            brightness: 0,
            last_brightness: last,
            changes: Vec::new(),
        }
    }

    /// Light currently on at `level`.
    pub fn on_at(level: u8) -> Self {
        Self {
            brightness: level,
            last_brightness: level,
            changes: Vec::new(),
        }
    }
}

impl LightOutput for SimLight {
    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn last_brightness(&self) -> u8 {
        self.last_brightness
    }

    fn set_brightness(&mut self, value: u8, notify: Notify) {
        self.brightness = value;
        self.changes.push((value, notify));
    }

    fn set_last_brightness(&mut self, value: u8) {
        self.last_brightness = value;
    }
}
