use std::{fs, io, path::PathBuf};

use lantern_core::deck::{ProbeFailure, ProbeOutcome, SlideProbe};

/// Filesystem-backed probe: the terminal host's stand-in for HTTP fetches.
/// A missing file is the scan terminator; every other I/O failure aborts
/// the load.
#[derive(Debug, Default)]
pub struct FsSlideProbe {
    root: PathBuf,
}

impl SlideProbe for FsSlideProbe {
    fn fetch(&mut self, path: &str) -> Result<ProbeOutcome, ProbeFailure> {
        match fs::read_to_string(self.root.join(path)) {
            Ok(content) => Ok(ProbeOutcome::Found(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(ProbeOutcome::NotFound),
            Err(err) => Err(ProbeFailure::Other(err.to_string())),
        }
    }
}
