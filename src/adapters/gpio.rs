//! ESP-IDF GPIO/ADC adapter — the only module that touches real pins.
//!
//! Pin numbers are runtime values (they come from the persisted config),
//! so this adapter drives the ESP-IDF C API directly instead of the typed
//! per-pin HAL wrappers. Digital reads go through `gpio_get_level`; analog
//! reads go through the legacy `adc1_get_raw` oneshot API with the GPIO
//! number mapped to its ADC1 channel.

use anyhow::Context;
use esp_idf_svc::sys;
use log::warn;

use crate::pins::ADC_RESOLUTION_BITS;
use crate::ports::{PinIo, PinMode};

/// ADC1 channel for a classic-ESP32 GPIO, or `None` if the pin has no
/// ADC1 routing (ADC2 is unusable alongside WiFi, so it is not offered).
fn adc1_channel_for_gpio(pin: u16) -> Option<sys::adc1_channel_t> {
    match pin {
        36 => Some(sys::adc1_channel_t_ADC1_CHANNEL_0),
        37 => Some(sys::adc1_channel_t_ADC1_CHANNEL_1),
        38 => Some(sys::adc1_channel_t_ADC1_CHANNEL_2),
        39 => Some(sys::adc1_channel_t_ADC1_CHANNEL_3),
        32 => Some(sys::adc1_channel_t_ADC1_CHANNEL_4),
        33 => Some(sys::adc1_channel_t_ADC1_CHANNEL_5),
        34 => Some(sys::adc1_channel_t_ADC1_CHANNEL_6),
        35 => Some(sys::adc1_channel_t_ADC1_CHANNEL_7),
        _ => None,
    }
}

/// Real-hardware [`PinIo`] implementation.
pub struct EspPinIo;

impl EspPinIo {
    /// Configure the ADC for 12-bit samples. The attenuation per channel is
    /// applied lazily on first analog read via [`PinIo::read_analog`].
    pub fn new() -> anyhow::Result<Self> {
        debug_assert_eq!(ADC_RESOLUTION_BITS, 12);
        sys::esp!(unsafe { sys::adc1_config_width(sys::adc_bits_width_t_ADC_WIDTH_BIT_12) })
            .context("adc1_config_width failed")?;
        Ok(Self)
    }
}

impl PinIo for EspPinIo {
    fn set_pin_mode(&mut self, pin: u16, mode: PinMode) {
        let dir = match mode {
            PinMode::Input => sys::gpio_mode_t_GPIO_MODE_INPUT,
            PinMode::Output => sys::gpio_mode_t_GPIO_MODE_OUTPUT,
        };
        if unsafe { sys::gpio_set_direction(i32::from(pin), dir) } != sys::ESP_OK {
            warn!("gpio: set_direction failed for pin {pin}");
        }
    }

    fn read_digital(&mut self, pin: u16) -> bool {
        unsafe { sys::gpio_get_level(i32::from(pin)) == 1 }
    }

    fn read_analog(&mut self, pin: u16) -> u16 {
        let Some(channel) = adc1_channel_for_gpio(pin) else {
            warn!("gpio: pin {pin} has no ADC1 channel, reading 0");
            return 0;
        };
        // 11 dB attenuation covers the full 0–3.1 V divider range.
        if unsafe { sys::adc1_config_channel_atten(channel, sys::adc_atten_t_ADC_ATTEN_DB_11) }
            != sys::ESP_OK
        {
            warn!("gpio: attenuation config failed for pin {pin}");
            return 0;
        }
        let raw = unsafe { sys::adc1_get_raw(channel) };
        if raw < 0 {
            warn!("gpio: adc1_get_raw failed for pin {pin}");
            return 0;
        }
        raw as u16
    }
}
