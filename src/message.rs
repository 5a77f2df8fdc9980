//! Host command message buffers.
//!
//! A [`Message`] holds one request/response exchange: the header fields and a
//! single payload buffer shared by the outgoing parameters and the incoming
//! response, sized to the larger of the two. Each exchange allocates its own
//! message, so nothing here is shared between concurrent callers.
//!
//! For transports that move plain byte streams, a message serializes to
//!
//! ```text
//! ┌───────────┬───────────┬───────────┬───────────┬───────────┬──────────────────┐
//! │ version   │ command   │ outsize   │ insize    │ result    │ params           │
//! │ (4B LE)   │ (4B LE)   │ (4B LE)   │ (4B LE)   │ (4B LE)   │ (outsize bytes)  │
//! └───────────┴───────────┴───────────┴───────────┴───────────┴──────────────────┘
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{commands::EcStatus, EcError, Result};

/// Size of the serialized message header.
pub const HEADER_SIZE: usize = 20;

/// One host command exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    version: u32,
    command: u32,
    outsize: usize,
    insize: usize,
    result: u32,
    received: usize,
    data: Vec<u8>,
}

impl Message {
    /// Allocate a zeroed message able to carry `outsize` bytes of parameters
    /// and `insize` bytes of response.
    pub fn new(command: u32, version: u32, outsize: usize, insize: usize) -> Result<Self> {
        let capacity = outsize.max(insize);
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).map_err(|_| EcError::OutOfMemory)?;
        data.resize(capacity, 0);
        Ok(Self {
            version,
            command,
            outsize,
            insize,
            result: 0,
            received: 0,
            data,
        })
    }

    /// Allocate a message and copy `params` in as its outgoing payload.
    pub fn with_params(command: u32, version: u32, params: &[u8], insize: usize) -> Result<Self> {
        let mut msg = Self::new(command, version, params.len(), insize)?;
        msg.data[..params.len()].copy_from_slice(params);
        Ok(msg)
    }

    /// Command protocol version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Command code, including the controller's offset.
    #[must_use]
    pub fn command(&self) -> u32 {
        self.command
    }

    /// Number of parameter bytes sent to the EC.
    #[must_use]
    pub fn outsize(&self) -> usize {
        self.outsize
    }

    /// Maximum number of response bytes accepted from the EC.
    #[must_use]
    pub fn insize(&self) -> usize {
        self.insize
    }

    /// Raw result code set by the transport from the EC's response.
    #[must_use]
    pub fn result(&self) -> u32 {
        self.result
    }

    /// Result code as reported by the EC.
    #[must_use]
    pub fn status(&self) -> EcStatus {
        EcStatus::from(self.result)
    }

    /// Set the result code. Called by transports once the EC has answered.
    pub fn set_result(&mut self, result: u32) {
        self.result = result;
    }

    /// Number of response bytes the transport reported for the last exchange.
    #[must_use]
    pub fn received(&self) -> usize {
        self.received
    }

    pub(crate) fn set_received(&mut self, received: usize) {
        self.received = received;
    }

    /// Parameters to send.
    #[must_use]
    pub fn outdata(&self) -> &[u8] {
        &self.data[..self.outsize]
    }

    /// Response area for the transport to fill.
    pub fn indata_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.insize]
    }

    /// Response bytes actually received, never past `insize`.
    #[must_use]
    pub fn indata(&self) -> &[u8] {
        &self.data[..self.received.min(self.insize)]
    }

    /// The whole response area, zero past what the EC sent.
    pub(crate) fn response_area(&self) -> &[u8] {
        &self.data[..self.insize]
    }

    /// Serialize the request half of the message.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_request_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(HEADER_SIZE + self.outsize);
        dst.put_u32_le(self.version);
        dst.put_u32_le(self.command);
        // sizes never exceed EC_HOST_PARAM_SIZE in practice
        dst.put_u32_le(self.outsize as u32);
        dst.put_u32_le(self.insize as u32);
        dst.put_u32_le(self.result);
        dst.put_slice(self.outdata());
        dst.freeze()
    }

    /// Parse a request serialized by [`Message::to_request_bytes`].
    ///
    /// Fails with [`EcError::ResponseSize`] when the payload does not match
    /// the declared output size.
    pub fn from_request_bytes(mut src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_SIZE {
            return Err(EcError::ResponseSize {
                expected: HEADER_SIZE,
                actual: src.len(),
            });
        }
        let version = src.get_u32_le();
        let command = src.get_u32_le();
        let outsize = src.get_u32_le() as usize;
        let insize = src.get_u32_le() as usize;
        let result = src.get_u32_le();
        if src.len() != outsize {
            return Err(EcError::ResponseSize {
                expected: outsize,
                actual: src.len(),
            });
        }
        let mut msg = Self::with_params(command, version, src, insize)?;
        msg.result = result;
        Ok(msg)
    }
}
