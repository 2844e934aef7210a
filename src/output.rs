//! Report destinations: stderr, stdout (`-`), or a file.
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Map an optional CLI path to a target; `-` means stdout and no path
    /// means `fallback`.
    pub fn from_arg(arg: Option<&Path>, fallback: OutputTarget) -> Self {
        match arg {
            None => fallback,
            Some(path) if path.as_os_str() == "-" => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_path_buf()),
        }
    }

    pub fn open(&self) -> Result<Box<dyn Write>> {
        Ok(match self {
            OutputTarget::Stderr => Box::new(io::stderr().lock()),
            OutputTarget::Stdout => Box::new(io::stdout().lock()),
            OutputTarget::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("create output {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
        })
    }

    fn label(&self) -> String {
        match self {
            OutputTarget::Stderr => "stderr".to_string(),
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        }
    }
}

/// Write `lines` to `target`, one per line.
pub fn write_lines(target: &OutputTarget, lines: &[String]) -> Result<()> {
    let mut out = target.open()?;
    for line in lines {
        writeln!(out, "{line}").with_context(|| format!("write {}", target.label()))?;
    }
    out.flush()
        .with_context(|| format!("flush {}", target.label()))?;
    Ok(())
}

/// Open `target` and hand the writer to `render`, flushing afterwards.
pub fn write_with<F>(target: &OutputTarget, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut out = target.open()?;
    render(out.as_mut()).with_context(|| format!("write {}", target.label()))?;
    out.flush()
        .with_context(|| format!("flush {}", target.label()))?;
    Ok(())
}
