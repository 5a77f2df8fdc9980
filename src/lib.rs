//! ChromeOS devices carry an Embedded Controller (EC) which handles the keyboard, power
//! sequencing, USB-PD and a number of other low-level duties. The EC is driven by the
//! application processor (AP) through "host commands": small, versioned request/response
//! exchanges carried over LPC, I2C, SPI or a similar link.
//!
//! This crate implements the text attribute layer sitting on top of those host commands.
//! Each controller exposes a handful of named attributes which can be read (and in some
//! cases written) as plain text:
//!
//! | Attribute       | Mode | Contents                                             |
//! |-----------------|------|------------------------------------------------------|
//! | `kb_wake_angle` | rw   | Lid angle above which the keyboard wakes the system  |
//! | `reboot`        | rw   | Reboot request keywords                              |
//! | `version`       | ro   | Firmware, build, chip and board versions             |
//! | `flashinfo`     | ro   | Flash geometry                                       |
//! | `usbpdmuxinfo`  | ro   | Per-port USB-PD mux state                            |
//! | `ap_mode_entry` | ro   | Whether alternate mode entry is driven by the AP     |
//!
//! # What This Crate Does
//!
//! - Host command encoding and response decoding ([`codec`], [`request`], [`response`])
//! - Result code and transport failure classification ([`EcError`])
//! - The attribute handlers themselves ([`attrs`])
//! - Attribute visibility and registration ([`group`])
//!
//! Moving bytes to the EC is not done here. The platform supplies an implementation of
//! [`Transport`] for whatever link the EC sits behind.
//!
//! # Background
//!
//! A single physical EC may front several logical controllers. The primary one is always
//! called `cros_ec`. Others, such as a separate PD controller, are reached through the
//! primary controller by adding a passthrough offset to every command code. The offset is
//! part of the [`Platform`] data attached to each [`Device`].
//!
//! Every exchange can fail in two distinct ways: the link may fail to carry the command
//! at all, or the EC may receive the command and reject it. The former is reported as
//! [`EcError::Transport`] carrying the link's status, the latter as [`EcError::Device`]
//! carrying the EC's result code. [`EcError::code`] maps both to a negative errno.
//!
//! ## Concurrency
//!
//! Attribute reads and writes hold no state of their own; every read issues fresh
//! commands. Several reads may run at once against one [`Device`] as long as the
//! transport serializes access to the link, which [`Transport`] implementations must do.
//!
//! # Simple Example
//!
//! ```
//! use ec_sysfs::{group, message::Message, Device, Platform, Transport};
//!
//! /// A link that answers every command with an empty success.
//! struct Quiet;
//!
//! impl Transport for Quiet {
//!     fn cmd_xfer(&self, msg: &mut Message) -> i32 {
//!         msg.set_result(0);
//!         0
//!     }
//! }
//!
//! let device = Device::new(Box::new(Quiet), Platform::primary());
//!
//! // Request a cold reboot once the AP shuts down.
//! let consumed = group::write(&device, "reboot", b"cold at-shutdown\n").unwrap();
//! assert_eq!(consumed, 17);
//!
//! // List the attributes this controller shows.
//! for (attr, mode) in group::visible_attributes(&device) {
//!     println!("{attr} {:o}", mode.bits());
//! }
//! ```
#![warn(clippy::all, clippy::pedantic, clippy::cargo, missing_docs)]
// Error conditions are those of the EC and its link, documented on `EcError`.
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod attrs;
pub mod codec;
pub mod commands;
mod device;
mod error;
pub mod group;
pub mod message;
pub mod prelude;
pub mod request;
pub mod response;
pub mod transport;
pub(crate) mod util;

pub use commands::EcStatus;
pub use device::{Device, Platform, CROS_EC_DEV_NAME};
pub use error::{EcError, Result};
pub use transport::Transport;
