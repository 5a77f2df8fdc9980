//! `usbpdmuxinfo`: mux state of every USB-PD port.
//!
//! These commands only make sense on the primary controller, so the command
//! offset is never applied.

use tracing::debug;

use super::AttrBuf;
use crate::{
    codec::{self, Request, Response},
    commands::HostCommand,
    request::GetUsbPdMuxInfo,
    response::{MuxInfo, UsbPdPorts},
    Device, EcError, Result,
};

fn num_ports(device: &Device) -> Result<u8> {
    let mut response = [0u8; UsbPdPorts::SIZE];
    let ports = device
        .cmd(0, HostCommand::UsbPdPorts.code(0), &[], &mut response)
        .and_then(|received| codec::decode_bytes::<UsbPdPorts>(&response, received));
    match ports {
        Ok(UsbPdPorts(n)) => Ok(n),
        Err(EcError::OutOfMemory) => Err(EcError::OutOfMemory),
        Err(e) => {
            debug!(error = %e, "failed to read USB-PD port count");
            Err(EcError::Io)
        }
    }
}

fn mux_info(device: &Device, port: u8) -> Result<MuxInfo> {
    let request = GetUsbPdMuxInfo { port };
    let mut response = [0u8; MuxInfo::SIZE];
    let received = device.cmd(
        GetUsbPdMuxInfo::VERSION,
        GetUsbPdMuxInfo::COMMAND.code(0),
        &codec::encode_params(&request),
        &mut response,
    )?;
    codec::decode_bytes(&response, received)
}

fn bit(flag: bool) -> u8 {
    u8::from(flag)
}

/// Ports whose query fails are left out. Fails if no port could be reported.
pub(crate) fn show(device: &Device, buf: &mut AttrBuf) -> Result<()> {
    for port in 0..num_ports(device)? {
        let mux = match mux_info(device, port) {
            Ok(mux) => mux,
            Err(EcError::OutOfMemory) => return Err(EcError::OutOfMemory),
            Err(e) => {
                debug!(port, error = %e, "skipping port");
                continue;
            }
        };
        buf.emit(format_args!(
            "Port {port}: USB={} DP={} POLARITY={} HPD_IRQ={} HPD_LVL={} SAFE={} TBT={} USB4={}\n",
            bit(mux.usb()),
            bit(mux.dp()),
            if mux.polarity_inverted() { "INVERTED" } else { "NORMAL" },
            bit(mux.hpd_irq()),
            bit(mux.hpd_lvl()),
            bit(mux.safe_mode()),
            bit(mux.tbt()),
            bit(mux.usb4()),
        ));
    }
    if buf.is_empty() {
        return Err(EcError::Io);
    }
    Ok(())
}
