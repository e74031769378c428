//! Line-oriented command loop over a [`StorageEngine`].

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::{
    api::StorageEngine,
    command::Command,
    config::StorageErrorPolicy,
    error::{Error, Result},
};

/// Printed by `GET` for a key that was never set.
pub const NULL_VALUE: &str = "NULL";

/// Reads commands from `input` until `EXIT` or end of input.
///
/// `GET` results are written to `output` one per line and flushed right away.
/// Malformed commands produce no output. A write that cannot be persisted is
/// handled according to `policy`.
pub fn run<R, W>(
    engine: &mut StorageEngine,
    mut input: R,
    mut output: W,
    policy: StorageErrorPolicy,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let Some(command) = std::str::from_utf8(&buf).ok().and_then(Command::parse) else {
            continue;
        };

        match command {
            Command::Exit => return Ok(()),
            Command::Get { key } => {
                let value = engine.get(&key).unwrap_or(NULL_VALUE);
                writeln!(output, "{value}")?;
                output.flush()?;
            }
            Command::Set { key, value } => match engine.set(&key, &value) {
                Ok(()) => {}
                Err(Error::Malformed(reason)) => {
                    debug!(%reason, "ignoring malformed SET");
                }
                Err(e) => match policy {
                    StorageErrorPolicy::Continue => {
                        error!(%key, error = %e, "write was not persisted");
                    }
                    StorageErrorPolicy::Exit => return Err(e),
                },
            },
        }
    }
}
