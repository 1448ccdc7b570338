//! GPIO button input.
//!
//! Three physical controls (active-low with internal pull-up):
//!   - Joystick switch - cycles the operating mode
//!   - A               - left click / next glyph
//!   - B               - right click / previous glyph
//!
//! Each control is handled by an async task woken by its GPIO edge
//! interrupt.  The press is timestamped and posted to the shared
//! [`InputMailbox`]; the mailbox's guard record does the debouncing,
//! so no delay sits between the edge and the timestamp.

use defmt::debug;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Timer};
use joyhid::config::BUTTON_RELEASE_SETTLE_MS;
use joyhid::{Control, InputMailbox};

/// Run a single button loop.
///
/// Waits for the pin to go low (pressed), posts the press, then waits
/// for release before re-arming.
pub async fn button_task(
    mut pin: Input<'static>,
    control: Control,
    inputs: &'static InputMailbox,
) -> ! {
    loop {
        // Falling edge = press (active-low).
        pin.wait_for_falling_edge().await;

        let accepted = inputs.press(control, Instant::now().as_millis());
        debug!("Button {} pressed (accepted: {})", control, accepted);

        pin.wait_for_rising_edge().await;
        inputs.release(control);
        Timer::after(Duration::from_millis(BUTTON_RELEASE_SETTLE_MS)).await;
    }
}
