//! `kb_wake_angle`: lid angle below which the keyboard can wake the system.

use super::AttrBuf;
use crate::{codec, request::KbWakeAngle, util::parse_u16, Device, Result};

pub(crate) fn show(device: &Device, buf: &mut AttrBuf) -> Result<()> {
    let angle = device.query(&KbWakeAngle::read())?;
    buf.emit(format_args!("{}\n", angle.0));
    Ok(())
}

/// Malformed input is rejected before the EC is contacted.
pub(crate) fn store(device: &Device, input: &[u8]) -> Result<usize> {
    let angle = parse_u16(input)?;
    let mut msg = codec::encode(&KbWakeAngle::write(angle), device.cmd_offset())?;
    // the response echoes the angle, nothing to check beyond the status
    device.xfer_status(&mut msg)?;
    Ok(input.len())
}
