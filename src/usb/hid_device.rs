//! USB HID composite device - keyboard + mouse on one interface.
//!
//! Initialises the Embassy USB stack on the RP2040 USB controller and
//! exposes a single HID interface whose descriptor carries report IDs.
//! The scheduler never awaits the endpoint: it hands reports to a
//! bounded queue that [`hid_writer_task`] drains.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{debug, info, warn, Debug2Format};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use joyhid::config;
use joyhid::hid::descriptor::{COMPOSITE_REPORT_DESCRIPTOR, MAX_INPUT_REPORT_SIZE};
use joyhid::hid::HidReport;
use joyhid::{Error, LinkEvent, Transport};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

pub type UsbDriver = Driver<'static, USB>;

/// Endpoint packet size; every report fits in one packet.
const HID_PACKET_SIZE: usize = 16;

pub type CompositeWriter = HidWriter<'static, UsbDriver, HID_PACKET_SIZE>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static USB_BUS_HANDLER: StaticCell<UsbBusHandler> = StaticCell::new();
static HOST_REQUESTS: StaticCell<HostRequests> = StaticCell::new();

static CONFIGURED: AtomicBool = AtomicBool::new(false);
static SUSPENDED: AtomicBool = AtomicBool::new(false);
static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, 8> = Channel::new();
static REPORTS: Channel<CriticalSectionRawMutex, HidReport, { config::REPORT_QUEUE_DEPTH }> =
    Channel::new();

/// Translates bus state callbacks into [`LinkEvent`]s for the scheduler.
struct UsbBusHandler;

impl UsbBusHandler {
    fn post(event: LinkEvent) {
        if LINK_EVENTS.try_send(event).is_err() {
            warn!("USB: link event queue full, dropped {}", event);
        }
    }
}

impl Handler for UsbBusHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            CONFIGURED.store(false, Ordering::Relaxed);
            Self::post(LinkEvent::Unmounted);
        }
    }

    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Relaxed);
        SUSPENDED.store(false, Ordering::Relaxed);
        Self::post(LinkEvent::Unmounted);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Relaxed);
        Self::post(if configured {
            LinkEvent::Mounted
        } else {
            LinkEvent::Unmounted
        });
    }

    fn suspended(&mut self, suspended: bool) {
        SUSPENDED.store(suspended, Ordering::Relaxed);
        Self::post(if suspended {
            LinkEvent::Suspended
        } else {
            LinkEvent::Resumed
        });
    }
}

/// Host requests on the control pipe.  Nothing is processed.
struct HostRequests;

impl RequestHandler for HostRequests {
    fn get_report(&mut self, id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        debug!("GET_REPORT {} ignored", Debug2Format(&id));
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        debug!("SET_REPORT {} ({} bytes) ignored", Debug2Format(&id), data.len());
        OutResponse::Accepted
    }
}

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writer: CompositeWriter,
}

/// Initialise the USB stack and create the composite HID device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usb: USB) -> UsbHidDevice {
    let driver = Driver::new(usb, Irqs);

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        USB_CONFIG_DESC.init([0u8; 256]),
        USB_BOS_DESC.init([0u8; 256]),
        USB_MSOS_DESC.init([0u8; 256]),
        USB_CTRL_BUF.init([0u8; 64]),
    );

    builder.handler(USB_BUS_HANDLER.init(UsbBusHandler));

    let hid_config = HidConfig {
        report_descriptor: COMPOSITE_REPORT_DESCRIPTOR,
        request_handler: Some(HOST_REQUESTS.init(HostRequests)),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: HID_PACKET_SIZE as u16,
    };
    let writer = HidWriter::new(&mut builder, HID_STATE.init(State::new()), hid_config);

    let device = builder.build();

    info!("USB HID composite device initialised (keyboard + mouse)");

    UsbHidDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Drains the report queue into the interrupt IN endpoint.
pub async fn hid_writer_task(mut writer: CompositeWriter) -> ! {
    info!("HID writer task started");

    let mut buf = [0u8; MAX_INPUT_REPORT_SIZE];

    loop {
        let report = REPORTS.receive().await;
        let n = report.serialize(&mut buf);
        if let Err(e) = writer.write(&buf[..n]).await {
            warn!("HID write failed: {} ({})", Error::Usb, e);
        }
    }
}

/// Scheduler-side handle on the USB device.
pub struct UsbTransport;

impl Transport for UsbTransport {
    fn service(&mut self) -> Option<LinkEvent> {
        LINK_EVENTS.try_receive().ok()
    }

    fn ready(&self) -> bool {
        CONFIGURED.load(Ordering::Relaxed)
            && !SUSPENDED.load(Ordering::Relaxed)
            && !REPORTS.is_full()
    }

    fn send(&mut self, report: HidReport) -> Result<(), Error> {
        if !CONFIGURED.load(Ordering::Relaxed) || SUSPENDED.load(Ordering::Relaxed) {
            return Err(Error::NotReady);
        }
        REPORTS.try_send(report).map_err(|_| Error::NotReady)
    }
}
