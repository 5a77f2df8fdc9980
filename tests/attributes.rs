//! End-to-end attribute access against a simulated EC.

use std::sync::{Arc, Mutex};

use ec_sysfs::{
    attrs::Mode,
    commands::{HostCommand, RebootCmd, EC_CMD_PASSTHRU_OFFSET, EC_REBOOT_FLAG_ON_AP_SHUTDOWN},
    group::{self, AttributeNode},
    message::Message,
    Device, EcError, EcStatus, Platform, Transport,
};

#[derive(Debug, Default)]
struct State {
    wake_angle: i16,
    reboots: Vec<(u8, u8)>,
    commands: Vec<u32>,
}

/// A small EC model answering the commands the attributes use.
struct SimulatedEc {
    state: Mutex<State>,
}

impl SimulatedEc {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
        })
    }

    fn reboots(&self) -> Vec<(u8, u8)> {
        self.state.lock().unwrap().reboots.clone()
    }

    fn commands(&self) -> Vec<u32> {
        self.state.lock().unwrap().commands.clone()
    }

    fn answer(msg: &mut Message, data: &[u8]) -> i32 {
        msg.set_result(u32::from(EcStatus::Success));
        msg.indata_mut()[..data.len()].copy_from_slice(data);
        i32::try_from(data.len()).unwrap()
    }

    fn reject(msg: &mut Message, status: EcStatus) -> i32 {
        msg.set_result(status.into());
        0
    }
}

impl Transport for SimulatedEc {
    fn cmd_xfer(&self, msg: &mut Message) -> i32 {
        let mut state = self.state.lock().unwrap();
        state.commands.push(msg.command());

        let base = u16::try_from(msg.command() % u32::from(EC_CMD_PASSTHRU_OFFSET)).unwrap();
        let Ok(command) = HostCommand::try_from(base) else {
            return Self::reject(msg, EcStatus::InvalidCommand);
        };
        let out = msg.outdata().to_vec();
        match command {
            HostCommand::MotionSense => {
                let value = i16::from_le_bytes([out[1], out[2]]);
                if value != -1 {
                    state.wake_angle = value;
                }
                let angle = state.wake_angle;
                Self::answer(msg, &angle.to_le_bytes())
            }
            HostCommand::RebootEc => {
                state.reboots.push((out[0], out[1]));
                Self::answer(msg, &[])
            }
            HostCommand::FlashInfo => {
                let raw: Vec<u8> = [0x10_0000u32, 32, 0x1000, 0x1000]
                    .iter()
                    .flat_map(|v| v.to_le_bytes())
                    .collect();
                Self::answer(msg, &raw)
            }
            HostCommand::UsbPdPorts => Self::answer(msg, &[2]),
            HostCommand::UsbPdMuxInfo => match out[0] {
                0 => Self::answer(msg, &[0b0001_0011]),
                _ => Self::reject(msg, EcStatus::InvalidParam),
            },
            HostCommand::GetFeatures => Self::answer(msg, &[0, 0, 0, 0, 0, 0b100, 0, 0]),
            _ => Self::reject(msg, EcStatus::InvalidCommand),
        }
    }
}

#[derive(Default)]
struct Directory {
    files: Vec<(&'static str, Mode)>,
}

impl AttributeNode for Directory {
    fn create_file(&mut self, name: &'static str, mode: Mode) -> Result<(), i32> {
        self.files.push((name, mode));
        Ok(())
    }

    fn remove_file(&mut self, name: &'static str) {
        self.files.retain(|(file, _)| *file != name);
    }
}

fn primary(ec: &Arc<SimulatedEc>) -> Device {
    Device::probe(Box::new(ec.clone()), Platform::primary()).with_kb_wake_angle(true)
}

#[test]
fn wake_angle_write_then_read() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);

    assert_eq!(group::write(&device, "kb_wake_angle", b"180\n"), Ok(4));
    assert_eq!(group::read(&device, "kb_wake_angle").as_deref(), Ok("180\n"));
    assert_eq!(group::write(&device, "kb_wake_angle", b"0x2d"), Ok(4));
    assert_eq!(group::read(&device, "kb_wake_angle").as_deref(), Ok("45\n"));
}

#[test]
fn rejected_wake_angle_leaves_the_ec_alone() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);
    let before = ec.commands().len();

    assert_eq!(
        group::write(&device, "kb_wake_angle", b"-5"),
        Err(EcError::InvalidArgument)
    );
    assert_eq!(ec.commands().len(), before);
}

#[test]
fn reboot_requests_reach_the_ec() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);

    assert_eq!(group::write(&device, "reboot", b"cold at-shutdown\n"), Ok(17));
    assert_eq!(group::write(&device, "reboot", b"RW"), Ok(2));
    assert_eq!(
        group::write(&device, "reboot", b"at-shutdown"),
        Err(EcError::InvalidArgument)
    );
    assert_eq!(
        ec.reboots(),
        [
            (u8::from(RebootCmd::Cold), EC_REBOOT_FLAG_ON_AP_SHUTDOWN),
            (u8::from(RebootCmd::JumpRw), 0),
        ]
    );
}

#[test]
fn read_only_attributes_refuse_writes() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);
    assert_eq!(group::write(&device, "flashinfo", b"1"), Err(EcError::AccessDenied));
}

#[test]
fn flash_and_mux_info() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);

    assert_eq!(
        group::read(&device, "flashinfo").as_deref(),
        Ok("FlashSize 1048576\nWriteSize 32\nEraseSize 4096\nProtectSize 4096\n")
    );
    // port 1 is rejected by the EC and left out
    assert_eq!(
        group::read(&device, "usbpdmuxinfo").as_deref(),
        Ok("Port 0: USB=1 DP=1 POLARITY=NORMAL HPD_IRQ=0 HPD_LVL=1 SAFE=0 TBT=0 USB4=0\n")
    );
    assert_eq!(group::read(&device, "ap_mode_entry").as_deref(), Ok("yes\n"));
}

#[test]
fn version_failure_is_reported() {
    let ec = SimulatedEc::new();
    let device = primary(&ec);
    let err = group::read(&device, "version").unwrap_err();
    assert_eq!(err, EcError::Device(EcStatus::InvalidCommand));
    assert_eq!(err.code(), -libc::EOPNOTSUPP);
}

#[test]
fn controllers_share_one_link() {
    let ec = SimulatedEc::new();
    let main = primary(&ec);
    let pd = Device::new(Box::new(ec.clone()), Platform::passthru("cros_pd", 1));

    let mut dir = Directory::default();
    group::attach(&pd, &mut dir).unwrap();
    assert_eq!(dir.files.len(), 6);

    let shown: Vec<_> = group::visible_attributes(&pd).map(|(a, _)| a.name()).collect();
    assert_eq!(shown, ["reboot", "version", "flashinfo"]);
    assert_eq!(group::read(&pd, "usbpdmuxinfo"), Err(EcError::NotFound));

    assert_eq!(group::write(&pd, "reboot", b"hibernate"), Ok(9));
    assert_eq!(group::write(&main, "reboot", b"cancel"), Ok(6));
    let reboots: Vec<_> = ec
        .commands()
        .into_iter()
        .filter(|&c| c % 0x4000 == 0xd2)
        .collect();
    assert_eq!(reboots, [0x40d2, 0xd2]);

    group::detach(&pd, &mut dir);
    assert!(dir.files.is_empty());
}
