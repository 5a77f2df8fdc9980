//! Public prelude of the crate containing the most commonly used types and functions.

pub use crate::{
    attrs::{Attribute, Mode},
    group::{attach, detach, read, write, AttributeNode},
    message::Message,
    Device, EcError, EcStatus, Platform, Result, Transport,
};
