//! Detection and invocation of the Graphviz `dot` program

use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use log::debug;

use crate::{Result, config::RenderFormat};

/// A Graphviz layout program found on the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graphviz {
    program: String,
}

impl Graphviz {
    pub const DEFAULT_PROGRAM: &'static str = "dot";

    /// Look for `dot` on the `PATH`
    pub fn detect() -> Option<Self> {
        Self::detect_program(Self::DEFAULT_PROGRAM)
    }

    /// Probe `program -V`; `None` if it cannot be started or fails
    pub fn detect_program(program: &str) -> Option<Self> {
        let status = Command::new(program)
            .arg("-V")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Some(Graphviz {
                program: program.to_string(),
            }),
            Ok(status) => {
                debug!("{program} -V exited with {status}");
                None
            }
            Err(e) => {
                debug!("{program} not available: {e}");
                None
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Lay out `source` and write it to `output` in `format`
    pub fn render(&self, source: &str, format: RenderFormat, output: &Path) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.extension()))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| crate::Error::Io {
                operation: format!("launch {}", self.program),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|source| crate::Error::Io {
                    operation: format!("pipe DOT source to {}", self.program),
                    source,
                })?;
        }

        let result = child.wait_with_output().map_err(|source| crate::Error::Io {
            operation: format!("wait for {}", self.program),
            source,
        })?;

        if !result.status.success() {
            return Err(crate::Error::RendererFailed {
                tool: self.program.clone(),
                message: format!(
                    "{} ({})",
                    String::from_utf8_lossy(&result.stderr).trim(),
                    result.status
                ),
            });
        }

        Ok(())
    }
}
