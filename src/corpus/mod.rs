//! Wikipedia abstract dump ingestion
//!
//! Training corpora are the `<lang>wiki-latest-abstract.xml` dump files.
//! Each dump streams through a background reader thread that pulls the
//! text out of every `<abstract>` element, normalizes it, and forwards
//! units long enough to carry signal. The bounded channel between reader
//! and trainer keeps memory flat no matter how large the dump is.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::text::normalize;

/// Units with this many normalized code points or fewer are discarded:
/// stub abstracts are mostly boilerplate and train noise.
pub const MIN_UNIT_CHARS: usize = 100;

/// Capacity of the unit channel between reader and trainer.
const UNIT_BUFFER: usize = 100;

/// A discovered dump file and the language it trains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiDump {
    pub lang: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus directory {dir}: {source}")]
    Dir {
        dir: String,
        #[source]
        source: std::io::Error,
    },
    #[error("open dump {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: quick_xml::Error,
    },
}

fn dump_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9]+)wiki-latest-abstract\.xml$").expect("valid regex")
    })
}

/// Find every `<lang>wiki-latest-abstract.xml` under `xml_dir`, sorted by
/// language. Stems shorter than two characters are ignored; they are stray
/// files, not language codes.
pub fn discover_dumps(xml_dir: &Path) -> Result<Vec<WikiDump>, CorpusError> {
    let entries = std::fs::read_dir(xml_dir).map_err(|e| CorpusError::Dir {
        dir: xml_dir.display().to_string(),
        source: e,
    })?;

    let mut dumps = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(caps) = dump_pattern().captures(name) else {
            continue;
        };
        let lang = caps[1].to_lowercase();
        if lang.len() < 2 {
            debug!("ignoring dump with one-letter code: {}", name);
            continue;
        }
        dumps.push(WikiDump { lang, path });
    }
    dumps.sort_by(|a, b| a.lang.cmp(&b.lang));
    Ok(dumps)
}

/// Iterator over the normalized units of one dump, fed by a background
/// reader thread. Dropping the stream early disconnects the channel and
/// the reader exits on its next send.
pub struct AbstractStream {
    rx: Receiver<String>,
}

impl Iterator for AbstractStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.rx.recv().ok()
    }
}

/// Stream the abstracts of one dump. Units are already normalized and
/// longer than [`MIN_UNIT_CHARS`] code points.
///
/// A parse error mid-file ends the stream with a warning; everything read
/// up to that point still trains.
pub fn stream_abstracts(path: &Path) -> Result<AbstractStream, CorpusError> {
    let reader = Reader::from_file(path).map_err(|e| CorpusError::Open {
        path: path.display().to_string(),
        source: e,
    })?;

    let (tx, rx) = bounded::<String>(UNIT_BUFFER);
    let label = path.display().to_string();
    thread::spawn(move || read_abstracts(reader, tx, label));

    Ok(AbstractStream { rx })
}

fn read_abstracts(mut reader: Reader<BufReader<File>>, tx: Sender<String>, label: String) {
    let mut buf = Vec::new();
    let mut in_abstract = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"abstract" => {
                in_abstract = true;
                text.clear();
            }
            Ok(Event::Text(ref t)) if in_abstract => match t.unescape() {
                Ok(chunk) => text.push_str(&chunk),
                Err(e) => warn!("bad text node in {}: {}", label, e),
            },
            Ok(Event::CData(ref t)) if in_abstract => {
                text.push_str(&String::from_utf8_lossy(t.as_ref()));
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"abstract" => {
                in_abstract = false;
                let unit = normalize(&text);
                if unit.chars().count() > MIN_UNIT_CHARS && tx.send(unit).is_err() {
                    break; // consumer gone
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("xml parse error in {}: {}", label, e);
                break;
            }
        }
        buf.clear();
    }
}
