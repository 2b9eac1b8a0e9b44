//! Open URLs in the system browser.
//!
//! `$BROWSER` wins when set; otherwise the platform opener is used
//! (`open` on macOS, `xdg-open` on Linux, `cmd /C start` on Windows).

use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

use crate::error::{AppError, Result};

/// Program and leading arguments used to open a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOpener {
    pub program: OsString,
    pub prefix_args: Vec<OsString>,
}

/// Platform opener for `target_os` (as in `std::env::consts::OS`).
///
/// # Errors
///
/// Returns `Browser` on platforms without a known opener.
pub fn opener_for_os(target_os: &str) -> Result<UrlOpener> {
    let (program, prefix_args): (&str, &[&str]) = match target_os {
        "macos" => ("open", &[]),
        "linux" | "freebsd" | "openbsd" | "netbsd" => ("xdg-open", &[]),
        "windows" => ("cmd", &["/C", "start", ""]),
        other => {
            return Err(AppError::Browser(format!(
                "no URL opener known for platform '{other}'"
            )));
        }
    };
    Ok(UrlOpener {
        program: program.into(),
        prefix_args: prefix_args.iter().map(OsString::from).collect(),
    })
}

fn opener_from_env(value: Option<OsString>) -> Option<UrlOpener> {
    value.filter(|program| !program.is_empty()).map(|program| UrlOpener {
        program,
        prefix_args: Vec::new(),
    })
}

/// Launch the browser on `url` and wait for the opener to exit.
///
/// # Errors
///
/// Returns `Browser` if `url` is empty, the opener is missing, or it exits
/// unsuccessfully.
pub fn open_in_browser(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(AppError::Browser("record has no html_url".to_string()));
    }

    let opener = match opener_from_env(std::env::var_os("BROWSER")) {
        Some(opener) => opener,
        None => opener_for_os(std::env::consts::OS)?,
    };
    tracing::debug!(program = ?opener.program, url, "Opening browser");

    let status = Command::new(&opener.program)
        .args(&opener.prefix_args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::Browser(format!(
                "'{}' was not found; set $BROWSER",
                opener.program.to_string_lossy()
            )),
            _ => AppError::Browser(e.to_string()),
        })?;

    if !status.success() {
        return Err(AppError::Browser(format!(
            "'{}' exited with {status}",
            opener.program.to_string_lossy()
        )));
    }
    Ok(())
}
