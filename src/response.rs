//! Host command response layouts.
//!
//! Each type here unpacks the fixed little-endian structure the EC returns for
//! one command. String fields are copied out with their last byte forced to
//! NUL, so they are always cut at their field boundary even when the EC left
//! them unterminated.

use bytes::Buf;

use crate::{
    codec::{fixed_str, Response},
    commands::{CurrentImage, Feature, EC_HOST_PARAM_SIZE},
};

const VERSION_STRING_LEN: usize = 32;
const CHIP_STRING_LEN: usize = 32;

/// Firmware versions reported by the EC.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionInfo {
    ro: String,
    rw: String,
    current_image: u32,
}

impl VersionInfo {
    /// Version of the read-only image.
    #[must_use]
    pub fn ro(&self) -> &str {
        &self.ro
    }

    /// Version of the read-write image.
    #[must_use]
    pub fn rw(&self) -> &str {
        &self.rw
    }

    /// Image currently running, `None` if the EC reported an unknown value.
    #[must_use]
    pub fn current_image(&self) -> Option<CurrentImage> {
        CurrentImage::try_from(self.current_image).ok()
    }
}

impl Response for VersionInfo {
    // ro, rw, reserved, current_image
    const SIZE: usize = 3 * VERSION_STRING_LEN + 4;

    fn decode(mut src: &[u8]) -> Self {
        let ro = fixed_str::<VERSION_STRING_LEN>(src);
        src.advance(VERSION_STRING_LEN);
        let rw = fixed_str::<VERSION_STRING_LEN>(src);
        src.advance(2 * VERSION_STRING_LEN);
        Self {
            ro,
            rw,
            current_image: src.get_u32_le(),
        }
    }
}

/// Free-form build description.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildInfo(String);

impl BuildInfo {
    /// The description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Response for BuildInfo {
    const SIZE: usize = EC_HOST_PARAM_SIZE;

    // the EC sends only as much of the string as it has
    fn accepts(received: usize) -> bool {
        received <= Self::SIZE
    }

    fn decode(src: &[u8]) -> Self {
        Self(fixed_str::<EC_HOST_PARAM_SIZE>(src))
    }
}

/// Chip identification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChipInfo {
    vendor: String,
    name: String,
    revision: String,
}

impl ChipInfo {
    /// Chip vendor.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Chip name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chip revision.
    #[must_use]
    pub fn revision(&self) -> &str {
        &self.revision
    }
}

impl Response for ChipInfo {
    const SIZE: usize = 3 * CHIP_STRING_LEN;

    fn decode(src: &[u8]) -> Self {
        let mut fields = src.chunks_exact(CHIP_STRING_LEN).map(fixed_str::<CHIP_STRING_LEN>);
        Self {
            vendor: fields.next().unwrap_or_default(),
            name: fields.next().unwrap_or_default(),
            revision: fields.next().unwrap_or_default(),
        }
    }
}

/// Board revision.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoardVersion(pub u16);

impl Response for BoardVersion {
    const SIZE: usize = 2;

    fn decode(mut src: &[u8]) -> Self {
        Self(src.get_u16_le())
    }
}

/// Flash geometry, all sizes in bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlashInfo {
    /// Usable flash size.
    pub flash_size: u32,
    /// Write granularity.
    pub write_block_size: u32,
    /// Erase granularity.
    pub erase_block_size: u32,
    /// Write-protect granularity.
    pub protect_block_size: u32,
}

impl Response for FlashInfo {
    const SIZE: usize = 16;

    fn decode(mut src: &[u8]) -> Self {
        Self {
            flash_size: src.get_u32_le(),
            write_block_size: src.get_u32_le(),
            erase_block_size: src.get_u32_le(),
            protect_block_size: src.get_u32_le(),
        }
    }
}

/// Keyboard wake angle in degrees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WakeAngle(pub i16);

impl Response for WakeAngle {
    const SIZE: usize = 2;

    fn decode(mut src: &[u8]) -> Self {
        Self(src.get_i16_le())
    }
}

/// Number of USB-PD ports.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UsbPdPorts(pub u8);

impl Response for UsbPdPorts {
    const SIZE: usize = 1;

    fn decode(mut src: &[u8]) -> Self {
        Self(src.get_u8())
    }
}

const USB_PD_MUX_USB_ENABLED: u8 = 1 << 0;
const USB_PD_MUX_DP_ENABLED: u8 = 1 << 1;
const USB_PD_MUX_POLARITY_INVERTED: u8 = 1 << 2;
const USB_PD_MUX_HPD_IRQ: u8 = 1 << 3;
const USB_PD_MUX_HPD_LVL: u8 = 1 << 4;
const USB_PD_MUX_SAFE_MODE: u8 = 1 << 5;
const USB_PD_MUX_TBT_COMPAT_ENABLED: u8 = 1 << 6;
const USB_PD_MUX_USB4_ENABLED: u8 = 1 << 7;

/// Mux state of one USB-PD port.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MuxInfo {
    flags: u8,
}

impl MuxInfo {
    /// Wrap a raw flags word.
    #[must_use]
    pub fn new(flags: u8) -> Self {
        Self { flags }
    }

    /// The raw flags word.
    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// USB data is routed through the port.
    #[must_use]
    pub fn usb(&self) -> bool {
        self.flags & USB_PD_MUX_USB_ENABLED != 0
    }

    /// DisplayPort is routed through the port.
    #[must_use]
    pub fn dp(&self) -> bool {
        self.flags & USB_PD_MUX_DP_ENABLED != 0
    }

    /// The plug is flipped.
    #[must_use]
    pub fn polarity_inverted(&self) -> bool {
        self.flags & USB_PD_MUX_POLARITY_INVERTED != 0
    }

    /// A DisplayPort hot-plug-detect interrupt is pending.
    #[must_use]
    pub fn hpd_irq(&self) -> bool {
        self.flags & USB_PD_MUX_HPD_IRQ != 0
    }

    /// DisplayPort hot-plug-detect level.
    #[must_use]
    pub fn hpd_lvl(&self) -> bool {
        self.flags & USB_PD_MUX_HPD_LVL != 0
    }

    /// The mux is parked in safe mode.
    #[must_use]
    pub fn safe_mode(&self) -> bool {
        self.flags & USB_PD_MUX_SAFE_MODE != 0
    }

    /// Thunderbolt-compatible mode is active.
    #[must_use]
    pub fn tbt(&self) -> bool {
        self.flags & USB_PD_MUX_TBT_COMPAT_ENABLED != 0
    }

    /// USB4 mode is active.
    #[must_use]
    pub fn usb4(&self) -> bool {
        self.flags & USB_PD_MUX_USB4_ENABLED != 0
    }
}

impl Response for MuxInfo {
    const SIZE: usize = 1;

    fn decode(mut src: &[u8]) -> Self {
        Self::new(src.get_u8())
    }
}

/// Snapshot of the EC's feature bitset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Features([u32; 2]);

impl Features {
    /// Build a feature set from the two raw feature words.
    #[must_use]
    pub fn from_words(words: [u32; 2]) -> Self {
        Self(words)
    }

    /// Build a feature set with exactly the given features.
    #[must_use]
    pub fn with(features: &[Feature]) -> Self {
        let mut words = [0u32; 2];
        for &feature in features {
            let bit = u8::from(feature);
            words[usize::from(bit / 32)] |= 1 << (bit % 32);
        }
        Self(words)
    }

    /// Check whether the EC advertises `feature`.
    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        let bit = u8::from(feature);
        self.0
            .get(usize::from(bit / 32))
            .is_some_and(|word| word & (1 << (bit % 32)) != 0)
    }

    /// The raw feature words.
    #[must_use]
    pub fn words(&self) -> [u32; 2] {
        self.0
    }
}

impl Response for Features {
    const SIZE: usize = 8;

    fn decode(mut src: &[u8]) -> Self {
        Self([src.get_u32_le(), src.get_u32_le()])
    }
}
