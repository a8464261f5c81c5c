//! [`ConfigSource`] backed by a Python interpreter's `sysconfig` module.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

use crate::{ConfigSource, Error, Result};

/// Program passed to `-c`. Prints the variable named by `argv[1]` as JSON:
/// `null` when unset, otherwise the hex of its filesystem-encoded bytes, so
/// values that are not valid UTF-8 come through unchanged.
const PROBE: &str = "import json, os, sys, sysconfig; \
    v = sysconfig.get_config_var(sys.argv[1]); \
    print(json.dumps(None if v is None else os.fsencode(str(v)).hex()))";

/// Interpreter names tried by [`PythonSysconfig::discover`], in order.
const CANDIDATES: &[&str] = &["python3", "python"];

/// Queries `sysconfig.get_config_var` of a Python interpreter.
///
/// Each lookup runs the interpreter once as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonSysconfig {
    /// Interpreter path or name.
    interpreter: PathBuf,
}

impl PythonSysconfig {
    /// Uses the given interpreter (a path or a name resolved via `PATH`).
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Finds the first of `python3`, `python` on `PATH` that runs.
    pub fn discover() -> Result<Self> {
        for &name in CANDIDATES {
            match Command::new(name)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                Ok(status) if status.success() => {
                    tracing::debug!(interpreter = name, "discovered python interpreter");
                    return Ok(Self::new(name));
                }
                Ok(status) => tracing::debug!(interpreter = name, %status, "skipping interpreter"),
                Err(e) => tracing::debug!(interpreter = name, error = %e, "skipping interpreter"),
            }
        }
        Err(Error::NoInterpreter)
    }

    /// The interpreter this source runs.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Interpreter rendered for error messages.
    fn program(&self) -> String {
        self.interpreter.display().to_string()
    }
}

impl ConfigSource for PythonSysconfig {
    fn config_var(&self, name: &str) -> Result<Option<OsString>> {
        tracing::debug!(interpreter = %self.interpreter.display(), name, "querying sysconfig");

        let out = Command::new(&self.interpreter)
            .arg("-c")
            .arg(PROBE)
            .arg(name)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program(),
                source,
            })?;

        if !out.status.success() {
            return Err(Error::QueryFailed {
                program: self.program(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_owned(),
            });
        }

        let value: Value = serde_json::from_slice(&out.stdout)?;
        tracing::debug!(name, %value, "sysconfig answered");
        from_json(value)
    }
}

/// Maps the probe's JSON answer to an optional OS string.
fn from_json(value: Value) -> Result<Option<OsString>> {
    match value {
        Value::Null => Ok(None),
        Value::String(encoded) => {
            let bytes = hex::decode(&encoded)
                .map_err(|e| Error::InvalidOutput(format!("{encoded}: {e}")))?;
            os_string(bytes).map(Some)
        }
        other => Err(Error::InvalidOutput(other.to_string())),
    }
}

/// Raw bytes are a valid path on unix.
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn os_string(bytes: Vec<u8>) -> Result<OsString> {
    use std::os::unix::ffi::OsStringExt;
    Ok(OsString::from_vec(bytes))
}

/// `os.fsencode` is UTF-8 outside unix.
#[cfg(not(unix))]
fn os_string(bytes: Vec<u8>) -> Result<OsString> {
    String::from_utf8(bytes)
        .map(OsString::from)
        .map_err(|e| Error::InvalidOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_answers() {
        assert_eq!(from_json(Value::Null).unwrap(), None);
        assert_eq!(
            from_json(json!(hex::encode("/usr/lib"))).unwrap(),
            Some(OsString::from("/usr/lib"))
        );
        assert_eq!(from_json(json!("")).unwrap(), Some(OsString::new()));
    }

    #[test]
    fn rejects_malformed_answers() {
        for bad in [json!("/usr/lib"), json!("abc"), json!(1), json!(["2f"])] {
            assert!(
                matches!(from_json(bad.clone()), Err(Error::InvalidOutput(_))),
                "{bad}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let value = from_json(json!(hex::encode(b"/opt/\xff/lib"))).unwrap().unwrap();
        assert_eq!(value.as_bytes(), b"/opt/\xff/lib");
    }

    #[test]
    fn no_interpreter_message() {
        assert_eq!(
            Error::NoInterpreter.to_string(),
            "no runnable python3 or python in PATH"
        );
    }

    #[test]
    fn missing_interpreter_is_spawn_error() {
        let src = PythonSysconfig::new("/nonexistent/rpathfind-python");
        match src.config_var("LIBDIR") {
            Err(Error::Spawn { program, .. }) => {
                assert_eq!(program, "/nonexistent/rpathfind-python");
            }
            other => panic!("expected Spawn, got {other:?}"),
        }
    }

    /// Runs against a real interpreter when one is installed.
    #[test]
    fn real_interpreter_libdir() {
        let Ok(src) = PythonSysconfig::discover() else {
            return;
        };
        // Some builds (e.g. embedded Windows distributions) leave LIBDIR unset.
        if let Some(libdir) = src.config_var("LIBDIR").unwrap() {
            assert!(!libdir.is_empty());
        }
        assert_eq!(src.config_var("RPATHFIND_NO_SUCH_VAR").unwrap(), None);
    }
}
