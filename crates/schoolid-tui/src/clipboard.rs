use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};

/// Helper commands tried in order; xsel is the legacy selection-based
/// fallback.
const HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["-b"]),
];

/// Best-effort copy of `value` to the system clipboard by piping it to the
/// first available helper.
pub fn copy(value: &str) -> Result<()> {
    for (program, args) in HELPERS {
        match try_copy(program, args, value) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(anyhow!("{program}: {err}")),
        }
    }
    Err(anyhow!(
        "no clipboard helper found (tried wl-copy, xclip, xsel)"
    ))
}

fn try_copy(program: &str, args: &[&str], value: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(value.as_bytes())?;
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "{program} exited with {status}"
        )));
    }
    Ok(())
}
