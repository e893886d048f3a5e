//! Port traits — the boundary between the usermod core and the host runtime.
//!
//! ```text
//!   host loop ──▶ BettlichtUsermod ──▶ PinIo / LightOutput
//! ```
//!
//! The host invokes the lifecycle methods on
//! [`BettlichtUsermod`](crate::usermod::BettlichtUsermod); everything the
//! core needs back from the host — pin reads, brightness reads and writes —
//! comes in through these traits, injected at call sites. The domain never
//! touches hardware or host globals directly, so the whole usermod is
//! testable with mock adapters.

/// Direction a GPIO pin is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Raw pin access supplied by the host platform.
///
/// Reads mirror hardware semantics: a failed or unmapped read yields the
/// idle sentinel (`false` / `0`), never an error. A zero reading counts as
/// "no motion" / "pitch dark sample", both of which are handled by the
/// trigger predicates, so a flaky pin can never take down the control loop.
pub trait PinIo {
    /// Configure a pin's direction. Called once from `setup`.
    fn set_pin_mode(&mut self, pin: u16, mode: PinMode);

    /// Read a digital input. `true` = HIGH. Sentinel `false` on failure.
    fn read_digital(&mut self, pin: u16) -> bool;

    /// Read a raw ADC sample (0–4095 at 12-bit). Sentinel `0` on failure.
    fn read_analog(&mut self, pin: u16) -> u16;
}

/// Whether a brightness change should be broadcast to external listeners.
///
/// Internally-driven changes (the automatic on/off rule) must not re-trigger
/// network notification subscribers; externally-originated ones must.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notify {
    /// Apply the change without informing notification subscribers.
    Silent,
    /// Propagate the change to notification subscribers.
    Subscribers,
}

/// The host-owned brightness state, read and written by the decision engine.
///
/// `brightness == 0` means off; nonzero means on. `last_brightness` is the
/// level to restore when turning back on. Single-writer-per-tick discipline:
/// the host loop is single-threaded and cooperative, so the engine is the
/// only writer while a tick is in flight — there is no lock.
pub trait LightOutput {
    /// Current output level. `0` = off.
    fn brightness(&self) -> u8;

    /// Level to restore on the next turn-on.
    fn last_brightness(&self) -> u8;

    /// Set the output level, with an explicit notification mode.
    fn set_brightness(&mut self, value: u8, notify: Notify);

    /// Record the level to restore on the next turn-on.
    fn set_last_brightness(&mut self, value: u8);
}
