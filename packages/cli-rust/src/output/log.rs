//! Log output that shares the terminal with live spinners
//!
//! Every concurrent host run draws into one [`MultiProgress`]. Log lines are
//! written with that display suspended, so they land above the spinners
//! instead of tearing through them.

use std::io::{self, Write};
use std::sync::OnceLock;

use indicatif::MultiProgress;

static PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

/// The process-wide multi-spinner display
pub fn progress() -> &'static MultiProgress {
    PROGRESS.get_or_init(MultiProgress::new)
}

/// `tracing` writer for stderr that clears the spinners while it writes
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_above(PROGRESS.get(), &mut io::stderr(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

fn write_above(
    multi: Option<&MultiProgress>,
    out: &mut dyn Write,
    buf: &[u8],
) -> io::Result<usize> {
    match multi {
        Some(multi) => multi.suspend(|| out.write(buf)),
        None => out.write(buf),
    }
}
