//! Packing of typed parameters into messages and unpacking of responses.
//!
//! Every host command has a fixed little-endian parameter layout and a fixed
//! response layout. [`Request`] and [`Response`] describe those layouts, and
//! [`encode`]/[`decode`] move them in and out of a [`Message`].

use std::ffi::CStr;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::{commands::HostCommand, message::Message, EcError, Result};

/// Parameters of a host command.
pub trait Request {
    /// Response layout returned by the EC for this command.
    type Response: Response;
    /// Command code, before the controller's offset is applied.
    const COMMAND: HostCommand;
    /// Command protocol version.
    const VERSION: u32 = 0;
    /// Size of the packed parameters.
    const SIZE: usize;

    /// Append the packed parameters to `dst`.
    fn encode(&self, dst: &mut BytesMut);
}

/// Response layout of a host command.
pub trait Response: Sized {
    /// Size of the packed response.
    const SIZE: usize;

    /// Whether a response of `received` bytes can be decoded.
    ///
    /// Fixed layouts must be received in full.
    fn accepts(received: usize) -> bool {
        received == Self::SIZE
    }

    /// Unpack the response from exactly [`Response::SIZE`] bytes.
    fn decode(src: &[u8]) -> Self;
}

impl Response for () {
    const SIZE: usize = 0;

    fn decode(_src: &[u8]) -> Self {}
}

/// Pack request parameters.
pub fn encode_params<P: Request>(params: &P) -> Bytes {
    let mut dst = BytesMut::with_capacity(P::SIZE);
    params.encode(&mut dst);
    debug_assert_eq!(dst.len(), P::SIZE);
    dst.freeze()
}

/// Build the message for `params`, applying the controller's command `offset`.
pub fn encode<P: Request>(params: &P, offset: u16) -> Result<Message> {
    Message::with_params(
        P::COMMAND.code(offset),
        P::VERSION,
        &encode_params(params),
        P::Response::SIZE,
    )
}

/// Decode the response carried by an exchanged message.
pub fn decode<R: Response>(msg: &Message) -> Result<R> {
    decode_bytes(msg.response_area(), msg.received())
}

/// Decode a response from `buf`, of which the transport reported `received` bytes.
pub fn decode_bytes<R: Response>(buf: &[u8], received: usize) -> Result<R> {
    if !R::accepts(received) || buf.len() < R::SIZE {
        debug!(
            expected = R::SIZE,
            received,
            "response size does not match layout"
        );
        return Err(EcError::ResponseSize {
            expected: R::SIZE,
            actual: received,
        });
    }
    Ok(R::decode(&buf[..R::SIZE]))
}

/// Copy a fixed-size string field out of a response.
///
/// The EC does not promise to terminate these fields, so the last byte is
/// forced to NUL first. The result never reaches past the field.
pub(crate) fn fixed_str<const N: usize>(src: &[u8]) -> String {
    let mut field = [0u8; N];
    field.copy_from_slice(&src[..N]);
    if let Some(last) = field.last_mut() {
        *last = 0;
    }
    CStr::from_bytes_until_nul(&field)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
