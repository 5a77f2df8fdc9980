//! Host command parameter layouts.

use bytes::{BufMut, BytesMut};

use crate::{
    codec::Request,
    commands::{
        HostCommand, RebootCmd, EC_MOTION_SENSE_NO_VALUE, MOTIONSENSE_CMD_KB_WAKE_ANGLE,
        MOTION_SENSE_VERSION,
    },
    response::{
        BoardVersion, BuildInfo, ChipInfo, Features, FlashInfo, MuxInfo, UsbPdPorts, VersionInfo,
        WakeAngle,
    },
};

macro_rules! query {
    ($(#[$meta:meta])* $name:ident => $command:ident, $response:ty) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
        pub struct $name;

        impl Request for $name {
            type Response = $response;
            const COMMAND: HostCommand = HostCommand::$command;
            const SIZE: usize = 0;

            fn encode(&self, _dst: &mut BytesMut) {}
        }
    };
}

query!(
    /// Read the RO/RW firmware version strings.
    GetVersion => GetVersion, VersionInfo
);
query!(
    /// Read the firmware build description.
    GetBuildInfo => GetBuildInfo, BuildInfo
);
query!(
    /// Read the chip vendor, name and revision.
    GetChipInfo => GetChipInfo, ChipInfo
);
query!(
    /// Read the board revision.
    GetBoardVersion => GetBoardVersion, BoardVersion
);
query!(
    /// Read the feature bitset.
    GetFeatures => GetFeatures, Features
);
query!(
    /// Read the flash geometry.
    GetFlashInfo => FlashInfo, FlashInfo
);
query!(
    /// Read the number of USB-PD ports.
    GetUsbPdPorts => UsbPdPorts, UsbPdPorts
);

/// Reboot or jump to another firmware image.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Reboot {
    /// What kind of reboot to perform.
    pub cmd: RebootCmd,
    /// `EC_REBOOT_FLAG_*` bits.
    pub flags: u8,
}

impl Request for Reboot {
    type Response = ();
    const COMMAND: HostCommand = HostCommand::RebootEc;
    const SIZE: usize = 2;

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(self.cmd.into());
        dst.put_u8(self.flags);
    }
}

/// Read or set the lid angle below which the keyboard wakes the system.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KbWakeAngle {
    data: i16,
}

impl KbWakeAngle {
    /// Query the current angle without changing it.
    #[must_use]
    pub fn read() -> Self {
        Self {
            data: EC_MOTION_SENSE_NO_VALUE,
        }
    }

    /// Set a new angle in degrees.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn write(angle: u16) -> Self {
        // the field is signed on the wire, carried bit-for-bit
        Self { data: angle as i16 }
    }
}

impl Request for KbWakeAngle {
    type Response = WakeAngle;
    const COMMAND: HostCommand = HostCommand::MotionSense;
    const VERSION: u32 = MOTION_SENSE_VERSION;
    const SIZE: usize = 3;

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(MOTIONSENSE_CMD_KB_WAKE_ANGLE);
        dst.put_i16_le(self.data);
    }
}

/// Read the mux state of one USB-PD port.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GetUsbPdMuxInfo {
    /// Zero-based port index.
    pub port: u8,
}

impl Request for GetUsbPdMuxInfo {
    type Response = MuxInfo;
    const COMMAND: HostCommand = HostCommand::UsbPdMuxInfo;
    const SIZE: usize = 1;

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(self.port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::encode, commands::EC_REBOOT_FLAG_ON_AP_SHUTDOWN};

    #[test]
    fn reboot_layout() {
        let msg = encode(
            &Reboot {
                cmd: RebootCmd::JumpRo,
                flags: EC_REBOOT_FLAG_ON_AP_SHUTDOWN,
            },
            0,
        )
        .unwrap();
        assert_eq!(msg.command(), 0xd2);
        assert_eq!(msg.version(), 0);
        assert_eq!(msg.outdata(), &[1, 2]);
        assert_eq!(msg.insize(), 0);
    }

    #[test]
    fn kb_wake_angle_layout() {
        let msg = encode(&KbWakeAngle::read(), 0x4000).unwrap();
        assert_eq!(msg.command(), 0x402b);
        assert_eq!(msg.version(), 2);
        assert_eq!(msg.outdata(), &[5, 0xff, 0xff]);
        assert_eq!(msg.insize(), 2);

        let msg = encode(&KbWakeAngle::write(180), 0).unwrap();
        assert_eq!(msg.outdata(), &[5, 180, 0]);
    }

    #[test]
    fn queries_have_no_params() {
        let msg = encode(&GetVersion, 0).unwrap();
        assert!(msg.outdata().is_empty());
        assert_eq!(msg.insize(), 100);

        let msg = encode(&GetBuildInfo, 0).unwrap();
        assert_eq!(msg.command(), 0x04);
        assert_eq!(msg.insize(), crate::commands::EC_HOST_PARAM_SIZE);
    }
}
