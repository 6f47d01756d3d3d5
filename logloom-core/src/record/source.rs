use crate::error::{EngineError, MalformedReason};
use crate::record::{CorpusParser, LineParser, Record};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// A stream of complete records, ascending by timestamp.
pub trait RecordSource {
    fn name(&self) -> &str;

    /// Yields the next complete record, with continuation lines already folded in.
    fn next_record(&mut self) -> Result<Option<Record>, EngineError>;
}

/// Reads records from any buffered reader, folding continuation lines into the
/// payload of the record they follow.
pub struct LineSource<R, P = CorpusParser> {
    name: String,
    reader: R,
    parser: P,
    line_no: usize,
    /// Header already read while scanning the previous record's continuations.
    lookahead: Option<Record>,
    /// Failure hit while looking for continuations; surfaced on the next call.
    deferred: Option<EngineError>,
    buf: String,
}

impl<R: BufRead> LineSource<R, CorpusParser> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self::with_parser(name, reader, CorpusParser)
    }
}

impl<R: BufRead, P: LineParser> LineSource<R, P> {
    pub fn with_parser(name: impl Into<String>, reader: R, parser: P) -> Self {
        Self {
            name: name.into(),
            reader,
            parser,
            line_no: 0,
            lookahead: None,
            deferred: None,
            buf: String::new(),
        }
    }

    fn read_line(&mut self) -> Result<bool, EngineError> {
        self.buf.clear();
        let n = match self.reader.read_line(&mut self.buf) {
            Ok(n) => n,
            // The undecodable line is consumed, so reading can resume after it.
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                self.line_no += 1;
                return Err(EngineError::malformed(
                    self.name.clone(),
                    self.line_no,
                    MalformedReason::InvalidEncoding,
                ));
            }
            Err(e) => return Err(EngineError::unavailable(self.name.clone(), e)),
        };
        if n == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    fn parse_next_line(&mut self) -> Result<Option<ParsedLine>, EngineError> {
        if !self.read_line()? {
            return Ok(None);
        }
        let line = self.buf.trim_end_matches(['\n', '\r']);

        match self.parser.parse_line(line) {
            Ok(Some(record)) => Ok(Some(ParsedLine::Header(record))),
            Ok(None) => Ok(Some(ParsedLine::Continuation(line.to_string()))),
            Err(reason) => Err(EngineError::malformed(
                self.name.clone(),
                self.line_no,
                reason,
            )),
        }
    }
}

enum ParsedLine {
    Header(Record),
    Continuation(String),
}

impl<R: BufRead, P: LineParser> RecordSource for LineSource<R, P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_record(&mut self) -> Result<Option<Record>, EngineError> {
        if let Some(error) = self.deferred.take() {
            return Err(error);
        }

        let mut current = match self.lookahead.take() {
            Some(record) => record,
            None => loop {
                match self.parse_next_line()? {
                    None => return Ok(None),
                    Some(ParsedLine::Header(record)) => break record,
                    // Blank lines carry no payload to attach to.
                    Some(ParsedLine::Continuation(line)) if line.trim().is_empty() => continue,
                    Some(ParsedLine::Continuation(_)) => {
                        return Err(EngineError::malformed(
                            self.name.clone(),
                            self.line_no,
                            MalformedReason::OrphanContinuation,
                        ));
                    }
                }
            },
        };

        // The record in hand is complete even if the line after it is bad.
        loop {
            match self.parse_next_line() {
                Ok(None) => break,
                Ok(Some(ParsedLine::Header(next))) => {
                    self.lookahead = Some(next);
                    break;
                }
                Ok(Some(ParsedLine::Continuation(line))) => {
                    current.payload.push('\n');
                    current.payload.push_str(&line);
                }
                Err(error) => {
                    self.deferred = Some(error);
                    break;
                }
            }
        }

        Ok(Some(current))
    }
}

pub type FileSource = LineSource<BufReader<File>>;

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| EngineError::unavailable(name.clone(), e))?;
        Ok(LineSource::new(name, BufReader::new(file)))
    }
}

/// Opens every path as a record source. Paths that cannot be opened are
/// excluded from the result and reported alongside it.
pub fn open_file_sources(paths: &[PathBuf]) -> (Vec<FileSource>, Vec<EngineError>) {
    let mut sources = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        match FileSource::open(path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "excluding unavailable source");
                failures.push(e);
            }
        }
    }

    (sources, failures)
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_record(&mut self) -> Result<Option<Record>, EngineError> {
        (**self).next_record()
    }
}
