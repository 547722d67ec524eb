//! Deck acquisition: discover how many slides exist by probing numbered
//! resources in sequence until the first miss.

use core::fmt;
use core::mem;

use log::{debug, info, warn};

/// Result of probing one numbered slide resource.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProbeOutcome {
    /// The resource exists; carries its content.
    Found(String),
    /// The resource is missing. This is the expected scan terminator, not
    /// an error.
    NotFound,
}

/// Probe failure classes, all distinct from the not-found terminator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProbeFailure {
    /// The resource could not be reached at all.
    Network,
    /// The server answered with a non-404 error status.
    Server { status: u16 },
    /// Anything else: malformed response, local I/O failure.
    Other(String),
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network unreachable"),
            Self::Server { status } => write!(f, "server error (status {status})"),
            Self::Other(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ProbeFailure {}

/// Existence check for slide resources. Implementors own the I/O: an HTTP
/// client in a browser host, the filesystem in a terminal host.
pub trait SlideProbe {
    /// Ask whether `path` exists, fetching its content when it does.
    fn fetch(&mut self, path: &str) -> Result<ProbeOutcome, ProbeFailure>;
}

/// Path of the numbered slide resource inside `folder`.
pub fn slide_path(folder: &str, index: u32) -> String {
    format!("{folder}/{index}.html")
}

/// Path of the optional slide-script resource inside `folder`.
pub fn script_path(folder: &str) -> String {
    format!("{folder}/script.js")
}

/// Probe the deck's optional script resource.
///
/// A missing script is the common case and yields `None`; any probe
/// failure is reported as-is.
pub fn fetch_script<P: SlideProbe>(
    folder: &str,
    probe: &mut P,
) -> Result<Option<String>, ProbeFailure> {
    match probe.fetch(&script_path(folder))? {
        ProbeOutcome::Found(content) => {
            debug!("deck: script resource found folder={folder}");
            Ok(Some(content))
        }
        ProbeOutcome::NotFound => Ok(None),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeckError {
    /// A probe failed with something other than the not-found terminator.
    /// The whole load aborts; no partial deck is published.
    Probe { index: u32, source: ProbeFailure },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe { index, source } => {
                write!(f, "probing slide {index} failed: {source}")
            }
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Probe { source, .. } => Some(source),
        }
    }
}

/// Ordered, contiguous slide contents for one presentation. Built by
/// [`DeckLoader`], immutable afterwards; a new load replaces it wholesale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlideDeck {
    start_index: u32,
    slides: Vec<String>,
}

impl SlideDeck {
    pub fn total_slides(&self) -> u32 {
        self.slides.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the first slide. 1 by convention throughout this crate.
    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    /// Content of slide `index`, using the deck's indexing convention.
    pub fn slide(&self, index: u32) -> Option<&str> {
        index
            .checked_sub(self.start_index)
            .and_then(|offset| self.slides.get(offset as usize))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(String::as_str)
    }
}

/// One step of a deck scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadStep {
    /// Slide at `index` fetched; the scan continues.
    Fetched { index: u32 },
    /// The scan hit its terminator; the deck is complete.
    Complete(SlideDeck),
}

/// Sequential prober that materializes a [`SlideDeck`].
///
/// An explicit state machine rather than a recursive chain: each
/// [`step`](Self::step) performs exactly one probe, so hosts may suspend
/// between probes however they like, and decks of any length never grow
/// the call stack.
#[derive(Debug)]
pub struct DeckLoader {
    folder: String,
    start_index: u32,
    next_index: u32,
    slides: Vec<String>,
}

impl DeckLoader {
    pub fn new(folder: &str, start_index: u32) -> Self {
        Self {
            folder: folder.to_owned(),
            start_index,
            next_index: start_index,
            slides: Vec::new(),
        }
    }

    /// Path the next [`step`](Self::step) will request.
    pub fn next_path(&self) -> String {
        slide_path(&self.folder, self.next_index)
    }

    /// Probe the next numbered resource.
    ///
    /// A miss finalizes the deck: the slide count is the last index that
    /// answered, which uniformly yields an empty (zero-slide) deck when
    /// the very first probe misses. Any probe failure aborts the load.
    pub fn step<P: SlideProbe>(&mut self, probe: &mut P) -> Result<LoadStep, DeckError> {
        let index = self.next_index;
        let path = slide_path(&self.folder, index);

        match probe.fetch(&path) {
            Ok(ProbeOutcome::Found(content)) => {
                debug!("deck: fetched slide index={index}");
                self.slides.push(content);
                self.next_index += 1;
                Ok(LoadStep::Fetched { index })
            }
            Ok(ProbeOutcome::NotFound) => {
                let deck = SlideDeck {
                    start_index: self.start_index,
                    slides: mem::take(&mut self.slides),
                };
                info!(
                    "deck: scan complete folder={} total_slides={}",
                    self.folder,
                    deck.total_slides()
                );
                self.next_index = self.start_index;
                Ok(LoadStep::Complete(deck))
            }
            Err(source) => {
                warn!("deck: probe failed index={index} err={source}");
                Err(DeckError::Probe { index, source })
            }
        }
    }

    /// Drive [`step`](Self::step) to completion in a plain loop.
    pub fn load<P: SlideProbe>(
        folder: &str,
        start_index: u32,
        probe: &mut P,
    ) -> Result<SlideDeck, DeckError> {
        let mut loader = Self::new(folder, start_index);
        loop {
            if let LoadStep::Complete(deck) = loader.step(probe)? {
                return Ok(deck);
            }
        }
    }
}
