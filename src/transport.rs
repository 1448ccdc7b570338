//! The USB side as seen from the scheduler: report sink plus bus
//! lifecycle notifications.

use crate::config::{BLINK_MOUNTED_MS, BLINK_NOT_MOUNTED_MS, BLINK_SUSPENDED_MS};
use crate::error::Error;
use crate::hid::HidReport;

/// Outbound HID transport.
///
/// `send` must not block: when the device cannot take a report right
/// now it returns [`Error::NotReady`] and the caller retries on a later
/// tick.
pub trait Transport {
    /// Service the transport once per main-loop iteration.
    ///
    /// Returns the oldest pending bus lifecycle notification, if any;
    /// the scheduler calls it until it yields `None`.
    fn service(&mut self) -> Option<LinkEvent>;

    /// Whether a report sent now would be accepted.
    fn ready(&self) -> bool;

    fn send(&mut self, report: HidReport) -> Result<(), Error>;
}

/// USB bus lifecycle notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Host selected a configuration.
    Mounted,
    /// Configuration cleared, bus reset or cable pulled.
    Unmounted,
    Suspended,
    Resumed,
}

/// Coarse connection state driving the status LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    NotMounted,
    Mounted,
    Suspended,
}

/// Tracks mount and suspend independently so that a resume returns to
/// whatever state preceded the suspend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Link {
    mounted: bool,
    suspended: bool,
}

impl Link {
    pub const fn new() -> Self {
        Self {
            mounted: false,
            suspended: false,
        }
    }

    pub fn apply(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::Mounted => {
                self.mounted = true;
                self.suspended = false;
            }
            LinkEvent::Unmounted => {
                self.mounted = false;
                self.suspended = false;
            }
            LinkEvent::Suspended => self.suspended = true,
            LinkEvent::Resumed => self.suspended = false,
        }
    }

    pub fn state(&self) -> LinkState {
        if self.suspended {
            LinkState::Suspended
        } else if self.mounted {
            LinkState::Mounted
        } else {
            LinkState::NotMounted
        }
    }
}

impl LinkState {
    /// Status LED toggle period for this state (ms).
    pub const fn blink_interval_ms(self) -> u64 {
        match self {
            LinkState::NotMounted => BLINK_NOT_MOUNTED_MS,
            LinkState::Mounted => BLINK_MOUNTED_MS,
            LinkState::Suspended => BLINK_SUSPENDED_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_mounted() {
        let link = Link::new();
        assert_eq!(link.state(), LinkState::NotMounted);
        assert_eq!(link.state().blink_interval_ms(), 250);
    }

    #[test]
    fn mount_suspend_resume() {
        let mut link = Link::new();
        link.apply(LinkEvent::Mounted);
        assert_eq!(link.state(), LinkState::Mounted);
        assert_eq!(link.state().blink_interval_ms(), 1000);

        link.apply(LinkEvent::Suspended);
        assert_eq!(link.state(), LinkState::Suspended);
        assert_eq!(link.state().blink_interval_ms(), 2500);

        link.apply(LinkEvent::Resumed);
        assert_eq!(link.state(), LinkState::Mounted);
    }

    #[test]
    fn resume_without_mount_is_not_mounted() {
        let mut link = Link::new();
        link.apply(LinkEvent::Suspended);
        link.apply(LinkEvent::Resumed);
        assert_eq!(link.state(), LinkState::NotMounted);
    }

    #[test]
    fn unmount_clears_everything() {
        let mut link = Link::new();
        link.apply(LinkEvent::Mounted);
        link.apply(LinkEvent::Suspended);
        link.apply(LinkEvent::Unmounted);
        assert_eq!(link.state(), LinkState::NotMounted);
    }
}
