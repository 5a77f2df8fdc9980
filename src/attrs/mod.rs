//! Attribute handlers.
//!
//! Each attribute is computed from a live command exchange every time it is
//! read; nothing is cached between reads. Reads produce newline-terminated
//! text bounded to one page, writes consume the whole input on success.

use std::{
    fmt::{self, Write},
    str::FromStr,
};

use crate::{Device, EcError, Result};

mod ap_mode;
mod flashinfo;
mod kb_wake_angle;
pub mod reboot;
mod usbpd_mux;
mod version;

/// Largest amount of text a single attribute read returns.
pub const PAGE_SIZE: usize = 4096;

/// Access mode of an attribute.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Readable by everyone.
    ReadOnly,
    /// Readable by everyone, writable by the owner.
    ReadWrite,
}

impl Mode {
    /// Permission bits.
    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            Mode::ReadOnly => 0o444,
            Mode::ReadWrite => 0o644,
        }
    }

    /// Whether the attribute accepts writes.
    #[must_use]
    pub fn writable(self) -> bool {
        self == Mode::ReadWrite
    }
}

/// The attributes exposed for each controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    /// Keyboard wake angle in degrees.
    KbWakeAngle,
    /// Reboot control.
    Reboot,
    /// Firmware, build, chip and board versions.
    Version,
    /// Flash geometry.
    FlashInfo,
    /// Per-port USB-PD mux state.
    UsbPdMuxInfo,
    /// Whether alternate mode entry is driven by the AP.
    ApModeEntry,
}

/// Every attribute, in directory order.
pub const ATTRIBUTES: [Attribute; 6] = [
    Attribute::KbWakeAngle,
    Attribute::Reboot,
    Attribute::Version,
    Attribute::FlashInfo,
    Attribute::UsbPdMuxInfo,
    Attribute::ApModeEntry,
];

impl Attribute {
    /// File name of the attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Attribute::KbWakeAngle => "kb_wake_angle",
            Attribute::Reboot => "reboot",
            Attribute::Version => "version",
            Attribute::FlashInfo => "flashinfo",
            Attribute::UsbPdMuxInfo => "usbpdmuxinfo",
            Attribute::ApModeEntry => "ap_mode_entry",
        }
    }

    /// Declared access mode, before visibility is applied.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Attribute::KbWakeAngle | Attribute::Reboot => Mode::ReadWrite,
            Attribute::Version
            | Attribute::FlashInfo
            | Attribute::UsbPdMuxInfo
            | Attribute::ApModeEntry => Mode::ReadOnly,
        }
    }

    /// Read the attribute from `device`.
    pub fn show(self, device: &Device) -> Result<String> {
        let mut buf = AttrBuf::new();
        match self {
            Attribute::KbWakeAngle => kb_wake_angle::show(device, &mut buf)?,
            Attribute::Reboot => reboot::show(&mut buf),
            Attribute::Version => version::show(device, &mut buf)?,
            Attribute::FlashInfo => flashinfo::show(device, &mut buf)?,
            Attribute::UsbPdMuxInfo => usbpd_mux::show(device, &mut buf)?,
            Attribute::ApModeEntry => ap_mode::show(device, &mut buf),
        }
        Ok(buf.into_string())
    }

    /// Write `input` to the attribute, returning the number of bytes consumed.
    ///
    /// Read-only attributes fail with [`EcError::AccessDenied`].
    pub fn store(self, device: &Device, input: &[u8]) -> Result<usize> {
        match self {
            Attribute::KbWakeAngle => kb_wake_angle::store(device, input),
            Attribute::Reboot => reboot::store(device, input),
            _ => Err(EcError::AccessDenied),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = EcError;

    fn from_str(name: &str) -> Result<Self> {
        ATTRIBUTES
            .into_iter()
            .find(|attr| attr.name() == name)
            .ok_or(EcError::NotFound)
    }
}

/// Page-bounded text output of an attribute read.
///
/// Text past [`PAGE_SIZE`] (less room for a terminator) is dropped silently.
#[derive(Debug, Default)]
pub(crate) struct AttrBuf {
    text: String,
}

impl AttrBuf {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append formatted text.
    pub(crate) fn emit(&mut self, args: fmt::Arguments<'_>) {
        // write_str below never fails
        let _ = self.write_fmt(args);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn into_string(self) -> String {
        self.text
    }
}

impl Write for AttrBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = (PAGE_SIZE - 1).saturating_sub(self.text.len());
        let mut end = s.len().min(room);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&s[..end]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for attr in ATTRIBUTES {
            assert_eq!(attr.name().parse::<Attribute>(), Ok(attr));
        }
        assert_eq!("nope".parse::<Attribute>(), Err(EcError::NotFound));
    }

    #[test]
    fn modes() {
        assert_eq!(Attribute::Reboot.mode().bits(), 0o644);
        assert_eq!(Attribute::KbWakeAngle.mode(), Mode::ReadWrite);
        assert_eq!(Attribute::Version.mode().bits(), 0o444);
        assert!(!Attribute::ApModeEntry.mode().writable());
    }

    #[test]
    fn buffer_is_page_bounded() {
        let mut buf = AttrBuf::new();
        for _ in 0..1000 {
            buf.emit(format_args!("{}\n", "abcdefgh"));
        }
        assert_eq!(buf.into_string().len(), PAGE_SIZE - 1);
    }

    #[test]
    fn buffer_truncates_on_char_boundary() {
        let mut buf = AttrBuf::new();
        buf.emit(format_args!("{}", "a".repeat(PAGE_SIZE - 2)));
        buf.emit(format_args!("é"));
        assert_eq!(buf.into_string().len(), PAGE_SIZE - 2);
    }
}
