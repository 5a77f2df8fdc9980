//! Host command protocol constants.
//!
//! Command codes, result codes and sub-command values understood by the EC.
//! Most users will not need this module directly, the attribute handlers in
//! [`attrs`](crate::attrs) build on top of it.

use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};

/// Largest parameter or response payload the host interface carries.
pub const EC_HOST_PARAM_SIZE: usize = 0xfc;

/// Command code distance between logical controllers sharing one link.
pub const EC_CMD_PASSTHRU_OFFSET: u16 = 0x4000;

/// Value passed in a motion sense request to read instead of write.
pub const EC_MOTION_SENSE_NO_VALUE: i16 = -1;

/// Sub-command of [`HostCommand::MotionSense`] for the keyboard wake angle.
pub const MOTIONSENSE_CMD_KB_WAKE_ANGLE: u8 = 5;

/// Protocol version of [`HostCommand::MotionSense`] that knows the wake angle.
pub const MOTION_SENSE_VERSION: u32 = 2;

/// Reboot flag: defer the reboot until the AP shuts down.
pub const EC_REBOOT_FLAG_ON_AP_SHUTDOWN: u8 = 1 << 1;

/// Host command codes.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum HostCommand {
    GetVersion = 0x0002,
    GetBuildInfo = 0x0004,
    GetChipInfo = 0x0005,
    GetBoardVersion = 0x0006,
    GetFeatures = 0x000d,
    FlashInfo = 0x0010,
    MotionSense = 0x002b,
    RebootEc = 0x00d2,
    UsbPdPorts = 0x0102,
    UsbPdMuxInfo = 0x011a,
}

impl HostCommand {
    /// The wire command code once the controller's offset is applied.
    #[must_use]
    pub fn code(self, offset: u16) -> u32 {
        u32::from(u16::from(self)) + u32::from(offset)
    }
}

/// Result code reported by the EC in every response.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, FromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum EcStatus {
    Success = 0,
    InvalidCommand = 1,
    Error = 2,
    InvalidParam = 3,
    AccessDenied = 4,
    InvalidResponse = 5,
    InvalidVersion = 6,
    InvalidChecksum = 7,
    InProgress = 8,
    Unavailable = 9,
    Timeout = 10,
    Overflow = 11,
    InvalidHeader = 12,
    RequestTruncated = 13,
    ResponseTooBig = 14,
    BusError = 15,
    Busy = 16,
    InvalidHeaderVersion = 17,
    InvalidHeaderCrc = 18,
    InvalidDataCrc = 19,
    DupUnavailable = 20,
    #[num_enum(catch_all)]
    Unknown(u32),
}

impl EcStatus {
    /// Map the result onto a negative errno, `0` for success.
    #[must_use]
    pub fn errno(self) -> i32 {
        match self {
            EcStatus::Success => 0,
            EcStatus::InvalidCommand => -libc::EOPNOTSUPP,
            EcStatus::Error => -libc::EIO,
            EcStatus::InvalidParam => -libc::EINVAL,
            EcStatus::AccessDenied => -libc::EACCES,
            EcStatus::InvalidVersion => -libc::ENOPROTOOPT,
            EcStatus::InvalidChecksum
            | EcStatus::InvalidHeaderVersion
            | EcStatus::InvalidHeaderCrc
            | EcStatus::InvalidDataCrc => -libc::EBADMSG,
            EcStatus::InProgress => -libc::EINPROGRESS,
            EcStatus::Unavailable | EcStatus::DupUnavailable => -libc::ENODATA,
            EcStatus::Timeout => -libc::ETIMEDOUT,
            EcStatus::Overflow => -libc::EOVERFLOW,
            EcStatus::InvalidHeader | EcStatus::RequestTruncated => -libc::EBADR,
            EcStatus::ResponseTooBig => -libc::EFBIG,
            EcStatus::BusError => -libc::EFAULT,
            EcStatus::Busy => -libc::EBUSY,
            EcStatus::InvalidResponse | EcStatus::Unknown(_) => -libc::EPROTO,
        }
    }
}

/// Reboot type carried by [`HostCommand::RebootEc`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RebootCmd {
    Cancel = 0,
    JumpRo = 1,
    JumpRw = 2,
    Cold = 4,
    DisableJump = 5,
    Hibernate = 6,
    ColdApOff = 8,
}

/// Firmware image the EC is currently running.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum CurrentImage {
    Unknown = 0,
    Ro = 1,
    Rw = 2,
}

impl CurrentImage {
    /// Name as printed by the `version` attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CurrentImage::Unknown => "unknown",
            CurrentImage::Ro => "RO",
            CurrentImage::Rw => "RW",
        }
    }
}

/// Feature bits reported by [`HostCommand::GetFeatures`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive)]
#[repr(u8)]
pub enum Feature {
    Limited = 0,
    Flash = 1,
    PwmFan = 2,
    PwmKeyb = 3,
    Lightbar = 4,
    Led = 5,
    MotionSense = 6,
    Keyb = 7,
    Pstore = 8,
    Port80 = 9,
    Thermal = 10,
    BklightSwitch = 11,
    WifiSwitch = 12,
    HostEvents = 13,
    Gpio = 14,
    I2c = 15,
    Charger = 16,
    Battery = 17,
    SmartBattery = 18,
    HangDetect = 19,
    Pmu = 20,
    SubMcu = 21,
    UsbPd = 22,
    UsbMux = 23,
    MotionSenseFifo = 24,
    Vstore = 25,
    UsbcSsMuxVirtual = 26,
    Rtc = 27,
    Fingerprint = 28,
    Touchpad = 29,
    Rwsig = 30,
    DeviceEvent = 31,
    UnifiedWakeMasks = 32,
    HostEvent64 = 33,
    ExecInRam = 34,
    Cec = 35,
    MotionSenseTightTimestamps = 36,
    RefinedTabletModeHysteresis = 37,
    Efs2 = 38,
    Scp = 39,
    Ish = 40,
    TypecCmd = 41,
    TypecRequireApModeEntry = 42,
    TypecMuxRequireApAck = 43,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_applies_to_code() {
        assert_eq!(HostCommand::GetVersion.code(0), 0x0002);
        assert_eq!(HostCommand::RebootEc.code(EC_CMD_PASSTHRU_OFFSET), 0x40d2);
    }

    #[test]
    fn unknown_status_is_kept() {
        assert_eq!(EcStatus::from(16), EcStatus::Busy);
        assert_eq!(EcStatus::from(0x99), EcStatus::Unknown(0x99));
        assert_eq!(u32::from(EcStatus::Unknown(0x99)), 0x99);
        assert_eq!(EcStatus::Unknown(0x99).errno(), -libc::EPROTO);
        assert_eq!(EcStatus::Success.errno(), 0);
    }

    #[test]
    fn generic_error_is_eio() {
        assert_eq!(EcStatus::from(2), EcStatus::Error);
        assert_eq!(EcStatus::from(2).errno(), -libc::EIO);
        assert_eq!(EcStatus::InvalidResponse.errno(), -libc::EPROTO);
    }

    #[test]
    fn current_image_range() {
        assert_eq!(CurrentImage::try_from(2).ok().map(CurrentImage::name), Some("RW"));
        assert!(CurrentImage::try_from(3).is_err());
    }
}
