//! Attribute visibility and registration.
//!
//! The full attribute set is attached to a controller's node once. Which of
//! the attributes a given controller actually shows is decided on every
//! directory read by [`visible_mode`], so visibility is never baked into the
//! node.

use tracing::{error, info};

use crate::{
    attrs::{Attribute, Mode, ATTRIBUTES},
    device::CROS_EC_DEV_NAME,
    Device, EcError, Result,
};

/// The node a controller exposes its attributes under.
///
/// Implemented by the attribute directory framework.
pub trait AttributeNode {
    /// Create one attribute file, failing with a negative errno.
    fn create_file(&mut self, name: &'static str, mode: Mode) -> std::result::Result<(), i32>;

    /// Remove an attribute file created by [`AttributeNode::create_file`].
    fn remove_file(&mut self, name: &'static str);
}

/// Mode `attr` is shown with on `device`, or `None` if it is hidden.
///
/// The keyboard wake angle only exists where it can be controlled. USB-PD mux
/// info and AP mode entry only exist on the primary controller.
#[must_use]
pub fn visible_mode(device: &Device, attr: Attribute) -> Option<Mode> {
    match attr {
        Attribute::KbWakeAngle if !device.has_kb_wake_angle() => None,
        Attribute::UsbPdMuxInfo | Attribute::ApModeEntry
            if device.platform().ec_name() != CROS_EC_DEV_NAME =>
        {
            None
        }
        _ => Some(attr.mode()),
    }
}

/// Whether `attr` is shown on `device`.
#[must_use]
pub fn is_visible(device: &Device, attr: Attribute) -> bool {
    visible_mode(device, attr).is_some()
}

/// Attributes shown on `device`, in directory order.
pub fn visible_attributes(device: &Device) -> impl Iterator<Item = (Attribute, Mode)> + '_ {
    ATTRIBUTES
        .into_iter()
        .filter_map(move |attr| visible_mode(device, attr).map(|mode| (attr, mode)))
}

fn lookup(device: &Device, name: &str) -> Result<(Attribute, Mode)> {
    let attr: Attribute = name.parse()?;
    let mode = visible_mode(device, attr).ok_or(EcError::NotFound)?;
    Ok((attr, mode))
}

/// Read the attribute called `name`.
pub fn read(device: &Device, name: &str) -> Result<String> {
    let (attr, _) = lookup(device, name)?;
    attr.show(device)
}

/// Write `input` to the attribute called `name`.
pub fn write(device: &Device, name: &str, input: &[u8]) -> Result<usize> {
    let (attr, mode) = lookup(device, name)?;
    if !mode.writable() {
        return Err(EcError::AccessDenied);
    }
    attr.store(device, input)
}

/// Attach the attribute set to `node`.
///
/// If any attribute cannot be created, the ones already created are removed
/// again and the failure is returned.
pub fn attach(device: &Device, node: &mut dyn AttributeNode) -> Result<()> {
    for (created, attr) in ATTRIBUTES.iter().enumerate() {
        if let Err(status) = node.create_file(attr.name(), attr.mode()) {
            error!(
                ec = device.platform().ec_name(),
                attribute = attr.name(),
                status,
                "failed to create attributes"
            );
            for attr in ATTRIBUTES[..created].iter().rev() {
                node.remove_file(attr.name());
            }
            return Err(EcError::Attach(status));
        }
    }
    info!(ec = device.platform().ec_name(), "attributes attached");
    Ok(())
}

/// Remove the attribute set from `node`.
pub fn detach(device: &Device, node: &mut dyn AttributeNode) {
    for attr in ATTRIBUTES.iter().rev() {
        node.remove_file(attr.name());
    }
    info!(ec = device.platform().ec_name(), "attributes detached");
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        commands::HostCommand,
        transport::mock::{MockTransport, Reply},
        Platform,
    };

    #[derive(Default)]
    struct Node {
        files: BTreeMap<&'static str, Mode>,
        fail_on: Option<&'static str>,
    }

    impl AttributeNode for Node {
        fn create_file(&mut self, name: &'static str, mode: Mode) -> std::result::Result<(), i32> {
            if self.fail_on == Some(name) {
                return Err(-libc::ENOMEM);
            }
            self.files.insert(name, mode);
            Ok(())
        }

        fn remove_file(&mut self, name: &'static str) {
            self.files.remove(name);
        }
    }

    fn device(platform: Platform) -> Device {
        Device::new(Box::new(MockTransport::new()), platform)
    }

    #[test]
    fn kb_wake_angle_needs_support() {
        let without = device(Platform::primary());
        assert!(!is_visible(&without, Attribute::KbWakeAngle));
        let with = device(Platform::primary()).with_kb_wake_angle(true);
        assert_eq!(visible_mode(&with, Attribute::KbWakeAngle), Some(Mode::ReadWrite));
    }

    #[test]
    fn secondary_controller_hides_typec_attributes() {
        let pd = device(Platform::passthru("cros_pd", 1)).with_kb_wake_angle(true);
        assert!(!is_visible(&pd, Attribute::UsbPdMuxInfo));
        assert!(!is_visible(&pd, Attribute::ApModeEntry));
        assert!(is_visible(&pd, Attribute::KbWakeAngle));
        assert!(is_visible(&pd, Attribute::Version));

        let names: Vec<_> = visible_attributes(&pd).map(|(a, _)| a.name()).collect();
        assert_eq!(names, ["kb_wake_angle", "reboot", "version", "flashinfo"]);
    }

    #[test]
    fn primary_controller_shows_everything_but_wake_angle() {
        let ec = device(Platform::primary());
        let names: Vec<_> = visible_attributes(&ec).map(|(a, _)| a.name()).collect();
        assert_eq!(
            names,
            ["reboot", "version", "flashinfo", "usbpdmuxinfo", "ap_mode_entry"]
        );
    }

    #[test]
    fn attach_and_detach() {
        let ec = device(Platform::primary());
        let mut node = Node::default();
        attach(&ec, &mut node).unwrap();
        assert_eq!(node.files.len(), ATTRIBUTES.len());
        assert_eq!(node.files["reboot"], Mode::ReadWrite);
        assert_eq!(node.files["version"], Mode::ReadOnly);
        detach(&ec, &mut node);
        assert!(node.files.is_empty());
    }

    #[test]
    fn failed_attach_leaves_nothing_behind() {
        let ec = device(Platform::primary());
        let mut node = Node {
            fail_on: Some("usbpdmuxinfo"),
            ..Node::default()
        };
        assert_eq!(attach(&ec, &mut node), Err(EcError::Attach(-libc::ENOMEM)));
        assert!(node.files.is_empty());
    }

    #[test]
    fn read_and_write_by_name() {
        let transport =
            MockTransport::new().reply(HostCommand::RebootEc.code(0), Reply::ok(Vec::new()));
        let ec = Device::new(Box::new(transport), Platform::primary());

        assert_eq!(write(&ec, "reboot", b"cancel\n"), Ok(7));
        assert_eq!(write(&ec, "version", b"x"), Err(EcError::AccessDenied));
        assert_eq!(write(&ec, "kb_wake_angle", b"90"), Err(EcError::NotFound));
        assert_eq!(read(&ec, "kb_wake_angle"), Err(EcError::NotFound));
        assert_eq!(read(&ec, "missing"), Err(EcError::NotFound));
        assert_eq!(read(&ec, "ap_mode_entry").as_deref(), Ok("no\n"));
    }
}
