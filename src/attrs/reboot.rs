//! `reboot`: list and issue reboot requests.
//!
//! Writes are a whitespace separated list of keywords in any order and case.
//! Exactly one reboot type must be named; when several are, the last one
//! written wins. `at-shutdown` may be added to defer the reboot, unknown words
//! are ignored.

use super::AttrBuf;
use crate::{
    commands::{RebootCmd, EC_REBOOT_FLAG_ON_AP_SHUTDOWN},
    request::Reboot,
    util::{is_space, until_nul},
    Device, EcError, Result,
};

#[derive(Copy, Clone, Debug)]
enum Word {
    Cmd(RebootCmd),
    Flag(u8),
}

// Matched in order against the start of each input word, so `cold-ap-off`
// must precede `cold`.
const WORDS: [(&str, Word); 8] = [
    ("cancel", Word::Cmd(RebootCmd::Cancel)),
    ("ro", Word::Cmd(RebootCmd::JumpRo)),
    ("rw", Word::Cmd(RebootCmd::JumpRw)),
    ("cold-ap-off", Word::Cmd(RebootCmd::ColdApOff)),
    ("cold", Word::Cmd(RebootCmd::Cold)),
    ("disable-jump", Word::Cmd(RebootCmd::DisableJump)),
    ("hibernate", Word::Cmd(RebootCmd::Hibernate)),
    ("at-shutdown", Word::Flag(EC_REBOOT_FLAG_ON_AP_SHUTDOWN)),
];

fn lookup(token: &[u8]) -> Option<Word> {
    WORDS.iter().find_map(|&(word, action)| {
        token
            .get(..word.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word.as_bytes()))
            .then_some(action)
    })
}

/// Parse reboot keywords into a request.
///
/// Fails with [`EcError::InvalidArgument`] if no reboot type is named.
///
/// ```
/// use ec_sysfs::{attrs::reboot::parse, commands::RebootCmd};
///
/// let req = parse(b"RO AT-SHUTDOWN\n").unwrap();
/// assert_eq!(req.cmd, RebootCmd::JumpRo);
/// assert_eq!(req.flags, 0b10);
/// ```
pub fn parse(input: &[u8]) -> Result<Reboot> {
    let mut cmd = None;
    let mut flags = 0;
    let tokens = until_nul(input)
        .split(|&b| is_space(b))
        .filter(|token| !token.is_empty());
    for token in tokens {
        match lookup(token) {
            Some(Word::Cmd(c)) => cmd = Some(c),
            Some(Word::Flag(f)) => flags |= f,
            None => {}
        }
    }
    let cmd = cmd.ok_or(EcError::InvalidArgument)?;
    Ok(Reboot { cmd, flags })
}

pub(crate) fn show(buf: &mut AttrBuf) {
    buf.emit(format_args!(
        "ro|rw|cancel|cold|disable-jump|hibernate|cold-ap-off"
    ));
    buf.emit(format_args!(" [at-shutdown]\n"));
}

pub(crate) fn store(device: &Device, input: &[u8]) -> Result<usize> {
    let request = parse(input)?;
    device.query(&request)?;
    Ok(input.len())
}
