//! Command output on stdout.
//!
//! A reader that goes away early (`tax-calc history list | head -1`) closes
//! the pipe; that ends the command quietly instead of as an error.

use std::io::{self, ErrorKind, Write};

/// Writes `bytes` to stdout and flushes.
pub fn write_stdout(bytes: impl AsRef<[u8]>) -> io::Result<()> {
    write_to(io::stdout().lock(), bytes)
}

pub fn write_to<W: Write>(
    mut out: W,
    bytes: impl AsRef<[u8]>,
) -> io::Result<()> {
    out.write_all(bytes.as_ref())?;
    out.flush()
}

/// True when `err` or anything in its source chain is a broken pipe.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Accepts nothing, like a pipe whose reader has exited.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(
            &mut self,
            _buf: &[u8],
        ) -> io::Result<usize> {
            Err(io::Error::from(ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_to_buffer() {
        let mut out = Vec::new();

        write_to(&mut out, "taxable_income\n").unwrap();

        assert_eq!(out, b"taxable_income\n");
    }

    #[test]
    fn closed_pipe_is_reported_as_broken_pipe() {
        let err = write_to(ClosedPipe, "{}\n")
            .context("Failed to write output")
            .unwrap_err();

        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn other_io_errors_are_not_broken_pipes() {
        let err = anyhow::Error::new(io::Error::from(ErrorKind::PermissionDenied))
            .context("Failed to write output");

        assert!(!is_broken_pipe(&err));
    }

    #[test]
    fn plain_errors_are_not_broken_pipes() {
        let err = anyhow::anyhow!("Calculation failed");

        assert!(!is_broken_pipe(&err));
    }
}
