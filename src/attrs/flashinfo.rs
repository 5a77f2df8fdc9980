use super::AttrBuf;
use crate::{request::GetFlashInfo, Device, Result};

pub(crate) fn show(device: &Device, buf: &mut AttrBuf) -> Result<()> {
    // The flash info shouldn't ever change, but ask each time anyway.
    let info = device.query(&GetFlashInfo)?;
    buf.emit(format_args!(
        "FlashSize {}\nWriteSize {}\nEraseSize {}\nProtectSize {}\n",
        info.flash_size, info.write_block_size, info.erase_block_size, info.protect_block_size
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::HostCommand,
        transport::mock::{MockTransport, Reply},
        EcError, EcStatus, Platform,
    };

    #[test]
    fn four_lines() {
        let raw: Vec<u8> = [0x8_0000u32, 4, 0x1000, 0x1_0000]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let transport = MockTransport::new().reply(HostCommand::FlashInfo.code(0), Reply::ok(raw));
        let device = Device::new(Box::new(transport), Platform::primary());

        let mut buf = AttrBuf::new();
        show(&device, &mut buf).unwrap();
        assert_eq!(
            buf.into_string(),
            "FlashSize 524288\nWriteSize 4\nEraseSize 4096\nProtectSize 65536\n"
        );
    }

    #[test]
    fn failure_aborts() {
        let transport =
            MockTransport::new().reply(HostCommand::FlashInfo.code(0), Reply::ec_error(3));
        let device = Device::new(Box::new(transport), Platform::primary());

        let mut buf = AttrBuf::new();
        let err = show(&device, &mut buf).unwrap_err();
        assert_eq!(err, EcError::Device(EcStatus::InvalidParam));
        assert_eq!(err.code(), -libc::EINVAL);
        assert!(buf.is_empty());
    }
}
