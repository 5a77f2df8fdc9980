use std::fmt::Debug;

use tracing::{debug, warn};

use crate::{
    codec::{self, Request},
    commands::{Feature, EC_CMD_PASSTHRU_OFFSET},
    message::Message,
    request::GetFeatures,
    response::Features,
    transport::{self, Transport},
    Result,
};

/// Name the enumeration framework gives the primary controller.
pub const CROS_EC_DEV_NAME: &str = "cros_ec";

/// Platform data the enumeration framework attaches to a controller.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Platform {
    ec_name: String,
    cmd_offset: u16,
}

impl Platform {
    /// Platform data for an arbitrary controller.
    pub fn new(ec_name: impl Into<String>, cmd_offset: u16) -> Self {
        Self {
            ec_name: ec_name.into(),
            cmd_offset,
        }
    }

    /// The primary controller, reached without a command offset.
    #[must_use]
    pub fn primary() -> Self {
        Self::new(CROS_EC_DEV_NAME, 0)
    }

    /// A secondary controller reached through the primary one.
    ///
    /// `index` counts from 1, each index shifts command codes by
    /// [`EC_CMD_PASSTHRU_OFFSET`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is 4 or more, which does not fit the 16-bit command space.
    pub fn passthru(ec_name: impl Into<String>, index: u16) -> Self {
        assert!(index < 4, "passthru index out of range");
        Self::new(ec_name, EC_CMD_PASSTHRU_OFFSET * index)
    }

    /// The controller's name.
    #[must_use]
    pub fn ec_name(&self) -> &str {
        &self.ec_name
    }

    /// Offset added to every command code.
    #[must_use]
    pub fn cmd_offset(&self) -> u16 {
        self.cmd_offset
    }
}

/// Handle to one logical EC.
///
/// The handle is created by the enumeration framework when the controller is
/// discovered and is immutable afterwards, so it can be shared between any
/// number of concurrent attribute accesses.
///
/// # Example
///
/// ```no_run
/// # fn transport() -> Box<dyn ec_sysfs::Transport> { unimplemented!() }
/// use ec_sysfs::{attrs::Attribute, Device, Platform};
///
/// let device = Device::probe(transport(), Platform::primary());
/// let text = Attribute::Version.show(&device).unwrap();
/// print!("{text}");
/// ```
pub struct Device {
    transport: Box<dyn Transport>,
    platform: Platform,
    features: Features,
    has_kb_wake_angle: bool,
}

impl Device {
    /// Wrap a transport. The feature set starts empty.
    pub fn new(transport: Box<dyn Transport>, platform: Platform) -> Self {
        Self {
            transport,
            platform,
            features: Features::default(),
            has_kb_wake_angle: false,
        }
    }

    /// Wrap a transport and read the feature set from the controller.
    ///
    /// A controller that cannot report its features is still usable, it just
    /// advertises none.
    pub fn probe(transport: Box<dyn Transport>, platform: Platform) -> Self {
        let mut device = Self::new(transport, platform);
        match device.query(&GetFeatures) {
            Ok(features) => {
                debug!(ec = device.platform.ec_name(), words = ?features.words(), "features");
                device.features = features;
            }
            Err(e) => {
                warn!(ec = device.platform.ec_name(), error = %e, "failed to read features");
            }
        }
        device
    }

    /// Replace the feature set.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Declare whether the keyboard wake angle can be controlled.
    #[must_use]
    pub fn with_kb_wake_angle(mut self, supported: bool) -> Self {
        self.has_kb_wake_angle = supported;
        self
    }

    /// Platform data of this controller.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Offset added to every command code.
    #[must_use]
    pub fn cmd_offset(&self) -> u16 {
        self.platform.cmd_offset
    }

    /// Feature set snapshot.
    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }

    /// Check whether the controller advertises `feature`.
    #[must_use]
    pub fn check_feature(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    /// Whether the keyboard wake angle can be controlled.
    #[must_use]
    pub fn has_kb_wake_angle(&self) -> bool {
        self.has_kb_wake_angle
    }

    /// Exchange a raw message, see [`transport::xfer_status`].
    pub fn xfer_status(&self, msg: &mut Message) -> Result<usize> {
        transport::xfer_status(self.transport.as_ref(), msg)
    }

    /// Single-shot exchange, see [`transport::cmd`].
    ///
    /// The command offset is *not* applied.
    pub fn cmd(
        &self,
        version: u32,
        command: u32,
        params: &[u8],
        response: &mut [u8],
    ) -> Result<usize> {
        transport::cmd(self.transport.as_ref(), version, command, params, response)
    }

    /// Encode `params`, exchange them with this controller and decode the response.
    pub fn query<P: Request>(&self, params: &P) -> Result<P::Response> {
        let mut msg = codec::encode(params, self.cmd_offset())?;
        self.xfer_status(&mut msg)?;
        codec::decode(&msg)
    }
}

impl Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("platform", &self.platform)
            .field("features", &self.features)
            .field("has_kb_wake_angle", &self.has_kb_wake_angle)
            .finish_non_exhaustive()
    }
}
