//! Synchronous command exchange with the EC.
//!
//! The bytes are moved by an external driver implementing [`Transport`]. The
//! functions here wrap that driver and split its outcome into transport
//! failures ([`EcError::Transport`]) and failures the EC itself reported
//! ([`EcError::Device`]). No timeout or retry happens at this layer.

use std::sync::Arc;

use tracing::debug;

use crate::{
    commands::EcStatus,
    error::try_xfer,
    message::Message,
    EcError, Result,
};

/// A link able to carry host commands to the EC.
///
/// Implementations serialize access to the physical link themselves if they
/// need to; callers may exchange commands concurrently.
///
/// Links that carry plain byte streams can put the request on the wire with
/// [`Message::to_request_bytes`]:
///
/// ```
/// use std::sync::Mutex;
///
/// use ec_sysfs::{message::Message, transport, Transport};
///
/// /// Logs every request and answers it with an empty success.
/// struct Wire(Mutex<Vec<u8>>);
///
/// impl Transport for Wire {
///     fn cmd_xfer(&self, msg: &mut Message) -> i32 {
///         let Ok(mut wire) = self.0.lock() else {
///             return -libc::EIO;
///         };
///         wire.extend_from_slice(&msg.to_request_bytes());
///         msg.set_result(0);
///         0
///     }
/// }
///
/// let link = Wire(Mutex::new(Vec::new()));
/// let mut msg = Message::with_params(0xd2, 0, &[1, 0], 0).unwrap();
/// assert_eq!(transport::xfer_status(&link, &mut msg), Ok(0));
///
/// let sent = Message::from_request_bytes(&link.0.lock().unwrap()).unwrap();
/// assert_eq!(sent.command(), 0xd2);
/// assert_eq!(sent.outdata(), &[1, 0]);
/// ```
pub trait Transport: Send + Sync {
    /// Send `msg.outdata()` and fill `msg.indata_mut()` with the response.
    ///
    /// Returns the number of response bytes on success, a negative errno if the
    /// command could not be moved. The EC's result code is stored with
    /// [`Message::set_result`].
    fn cmd_xfer(&self, msg: &mut Message) -> i32;
}

/// Logical controllers sharing one physical link share its transport.
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn cmd_xfer(&self, msg: &mut Message) -> i32 {
        (**self).cmd_xfer(msg)
    }
}

/// Exchange `msg` and check the result the EC reported.
///
/// On success the number of received bytes is returned and recorded in the
/// message. `msg.result()` stays readable after a failure.
pub fn xfer_status(transport: &dyn Transport, msg: &mut Message) -> Result<usize> {
    let received = try_xfer!(transport.cmd_xfer(msg)).map_err(|e| {
        debug!(command = msg.command(), status = e.code(), "command transfer failed");
        e
    })?;
    if received > msg.insize() {
        debug!(
            command = msg.command(),
            received,
            insize = msg.insize(),
            "transport overran response buffer"
        );
        return Err(EcError::ResponseSize {
            expected: msg.insize(),
            actual: received,
        });
    }
    msg.set_received(received);
    match msg.status() {
        EcStatus::Success => Ok(received),
        status => {
            debug!(command = msg.command(), ?status, "command failed on EC");
            Err(EcError::Device(status))
        }
    }
}

/// Single-shot exchange without raw buffer control.
///
/// Sends `params` and copies the response into `response`, which also sets
/// the accepted response size. The command code is used as given.
pub fn cmd(
    transport: &dyn Transport,
    version: u32,
    command: u32,
    params: &[u8],
    response: &mut [u8],
) -> Result<usize> {
    let mut msg = Message::with_params(command, version, params, response.len())?;
    let received = xfer_status(transport, &mut msg)?;
    response.copy_from_slice(msg.response_area());
    Ok(received)
}
