use super::AttrBuf;
use crate::{commands::Feature, Device};

/// Reports whether the AP, rather than the EC, drives Type-C alternate mode entry.
pub(crate) fn show(device: &Device, buf: &mut AttrBuf) {
    let ap_driven_altmode = device.check_feature(Feature::TypecRequireApModeEntry);
    buf.emit(format_args!(
        "{}\n",
        if ap_driven_altmode { "yes" } else { "no" }
    ));
}
