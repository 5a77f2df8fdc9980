use tracing::debug;

use super::AttrBuf;
use crate::{
    codec::{self, Request},
    request::{GetBoardVersion, GetBuildInfo, GetChipInfo, GetVersion},
    Device, Result,
};

/// A failed sub-query: the transfer status and the EC's result code.
struct Failure {
    status: i32,
    result: u32,
}

/// Run one sub-query whose failure is reported inline.
///
/// Only allocation failures escape through the outer `Result`.
fn sub_query<P: Request>(
    device: &Device,
    params: &P,
) -> Result<std::result::Result<P::Response, Failure>> {
    let mut msg = codec::encode(params, device.cmd_offset())?;
    let outcome = device
        .xfer_status(&mut msg)
        .and_then(|_| codec::decode(&msg));
    Ok(outcome.map_err(|e| {
        debug!(command = msg.command(), error = %e, "version sub-query failed");
        Failure {
            status: e.code(),
            result: msg.result(),
        }
    }))
}

fn emit_failure(buf: &mut AttrBuf, label: &str, failure: &Failure) {
    buf.emit(format_args!(
        "{label} XFER / EC ERROR {} / {}\n",
        failure.status, failure.result
    ));
}

/// The firmware versions are required. Build info, chip info and board version
/// each print a diagnostic line in place of their data when they fail.
pub(crate) fn show(device: &Device, buf: &mut AttrBuf) -> Result<()> {
    // RW may change, so ask every time.
    let version = device.query(&GetVersion)?;
    buf.emit(format_args!("RO version:    {}\n", version.ro()));
    buf.emit(format_args!("RW version:    {}\n", version.rw()));
    buf.emit(format_args!(
        "Firmware copy: {}\n",
        version.current_image().map_or("?", |image| image.name())
    ));

    match sub_query(device, &GetBuildInfo)? {
        Ok(info) => buf.emit(format_args!("Build info:    {}\n", info.as_str())),
        Err(failure) => emit_failure(buf, "Build info:   ", &failure),
    }

    match sub_query(device, &GetChipInfo)? {
        Ok(chip) => {
            buf.emit(format_args!("Chip vendor:   {}\n", chip.vendor()));
            buf.emit(format_args!("Chip name:     {}\n", chip.name()));
            buf.emit(format_args!("Chip revision: {}\n", chip.revision()));
        }
        Err(failure) => emit_failure(buf, "Chip info:    ", &failure),
    }

    match sub_query(device, &GetBoardVersion)? {
        Ok(board) => buf.emit(format_args!("Board version: {}\n", board.0)),
        Err(failure) => emit_failure(buf, "Board version:", &failure),
    }

    Ok(())
}
