use crate::error::MalformedReason;
use crate::record::{EntityKey, Record, StreamKey, Timestamp};

const HEADER_DELIMITER: &str = "::";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const PERSISTED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Turns one raw line into a record.
pub trait LineParser {
    /// Returns `Ok(None)` when the line continues the previous record's payload.
    fn parse_line(&self, line: &str) -> Result<Option<Record>, MalformedReason>;
}

/// Parser for the corpus grammar:
///
/// ```text
/// <stream>:<entity>::<producer> <yyyy-MM-dd> <HH:mm:ss,SSS> - <payload>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusParser;

impl LineParser for CorpusParser {
    fn parse_line(&self, line: &str) -> Result<Option<Record>, MalformedReason> {
        let Some(header_end) = line.find(HEADER_DELIMITER) else {
            return Ok(None);
        };

        let stream_end = line
            .find(':')
            .filter(|idx| *idx < header_end)
            .ok_or(MalformedReason::MissingDelimiter(":"))?;

        let raw_stream = line[..stream_end].trim();
        let stream = raw_stream
            .parse::<i64>()
            .map(StreamKey)
            .map_err(|_| MalformedReason::InvalidStreamKey(raw_stream.to_string()))?;

        let entity = EntityKey(line[stream_end + 1..header_end].to_string());

        let rest = &line[header_end + HEADER_DELIMITER.len()..];
        let (producer, rest) = rest
            .split_once(' ')
            .ok_or(MalformedReason::MissingDelimiter(" "))?;

        // The date and time halves are separated by a space; the payload separator
        // is the first `-` after that space.
        let time_start = rest
            .find(' ')
            .ok_or(MalformedReason::MissingDelimiter(" "))?;
        let dash = rest[time_start + 1..]
            .find('-')
            .map(|idx| idx + time_start + 1)
            .ok_or(MalformedReason::MissingDelimiter(" - "))?;

        let raw_timestamp = rest[..dash].trim();
        let timestamp = parse_timestamp(raw_timestamp)
            .ok_or_else(|| MalformedReason::InvalidTimestamp(raw_timestamp.to_string()))?;

        Ok(Some(Record {
            entity,
            stream,
            producer: producer.to_string(),
            timestamp,
            payload: rest[dash + 1..].trim().to_string(),
        }))
    }
}

/// Parses `yyyy-MM-dd HH:mm:ss` with an optional `,SSS` or `.SSS` fraction.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let normalized = raw.trim().replacen(',', ".", 1);
    Timestamp::parse_from_str(&normalized, TIMESTAMP_FORMAT).ok()
}

pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(PERSISTED_TIMESTAMP_FORMAT).to_string()
}

/// Renders a record back into the corpus grammar so it can be re-read by [`CorpusParser`].
pub fn format_record(record: &Record) -> String {
    format!(
        "{}:{}::{} {} - {}",
        record.stream,
        record.entity,
        record.producer,
        format_timestamp(&record.timestamp),
        record.payload
    )
}
