//! Header decoding: magic number plus table-driven text fields.

use crate::config::{HeaderConfig, HeaderField, HeaderRole, MAGIC_LEN};
use crate::error::Result;
use crate::model::{ByteSpan, FieldCandidate, FieldKind, Header, HeaderFieldMatch, Value};
use crate::reader::{decode_permissive, ByteReader};
use tracing::debug;

/// Confidence of a header field whose terminator was found.
const TERMINATED_CONFIDENCE: f64 = 1.0;

/// Confidence of a header field cut at the length cap.
const UNTERMINATED_CONFIDENCE: f64 = 0.5;

/// Header plus the candidates it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHeader {
    pub header: Header,
    pub candidates: Vec<FieldCandidate>,
}

/// Decode the header. Only the magic read can fail.
pub fn decode_header(reader: &ByteReader<'_>, config: &HeaderConfig) -> Result<DecodedHeader> {
    let magic = reader.read_u32_le(0)?;
    debug!("Magic: 0x{:08x}", magic);

    let mut header = Header {
        magic,
        ..Default::default()
    };
    let mut candidates = vec![FieldCandidate::new(
        ByteSpan::new(0, MAGIC_LEN),
        FieldKind::Magic,
        Value::U32(magic),
        1.0,
    )];

    for field in &config.fields {
        let Some(found) = locate_field(reader, field, config.max_field_len) else {
            debug!("Header field '{}' not present", field.label);
            continue;
        };

        debug!("Header field '{}' at {}: {:?}", found.label, found.span, found.text);

        match found.role {
            HeaderRole::Timestamp if header.timestamp.is_none() => {
                header.timestamp = Some(found.text.clone());
            }
            HeaderRole::SoftwareVersion if header.software_version.is_none() => {
                header.software_version = Some(found.text.clone());
            }
            _ => {}
        }

        let kind = match found.role {
            HeaderRole::Timestamp => FieldKind::Timestamp,
            HeaderRole::SoftwareVersion => FieldKind::VersionString,
            HeaderRole::Custom => FieldKind::UnknownText,
        };
        let confidence = if found.terminated {
            TERMINATED_CONFIDENCE
        } else {
            UNTERMINATED_CONFIDENCE
        };
        candidates.push(FieldCandidate::new(
            found.span,
            kind,
            Value::Text(found.text.clone()),
            confidence,
        ));
        header.fields.push(found);
    }

    Ok(DecodedHeader { header, candidates })
}

/// Find the earliest match of any of the field's patterns and cut its text.
fn locate_field(
    reader: &ByteReader<'_>,
    field: &HeaderField,
    max_len: usize,
) -> Option<HeaderFieldMatch> {
    let (start, pattern_len) = field
        .patterns
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| {
            reader
                .find_ascii(p, MAGIC_LEN)
                .map(|offset| (offset, idx, p.len()))
        })
        .min_by_key(|&(offset, idx, _)| (offset, idx))
        .map(|(offset, _, len)| (offset, len))?;

    let cap = start.saturating_add(max_len).min(reader.len());
    let terminator = reader
        .find_ascii(field.terminator.as_bytes(), start + pattern_len)
        .filter(|&t| t <= cap);
    let end = terminator.unwrap_or(cap);

    let span = ByteSpan::from_range(start, end);
    let text = reader.slice(span).map(decode_permissive).ok()?;

    Some(HeaderFieldMatch {
        label: field.label.clone(),
        role: field.role,
        text,
        span,
        terminated: terminator.is_some(),
    })
}
