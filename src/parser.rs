use crate::matrix::{ParsedMatrix, SegmentRecord};
use crate::normalize;

use percent_encoding::percent_decode_str;

/// Options accepted by the built-in parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Caps the number of `;`-delimited parameter tokens consumed per
    /// segment; tokens past the cap are ignored. Bare tokens count toward
    /// the cap. `None` removes it.
    pub max_keys: Option<usize>,
}

/// A raw `key=value` token as it appeared in a segment's parameter portion,
/// percent-decoded. A token without `=` has no value at all, which is
/// distinct from `key=` (empty value).
pub(crate) struct RawPair {
    pub(crate) key: String,
    pub(crate) value: Option<String>,
}

/// Parses a path into its matrix representation using default options.
///
/// ```rust
/// use matrix_params::MatrixValue;
///
/// let parsed = matrix_params::parse("/club;name=lakers;address=downtown/members;role=guest");
///
/// assert_eq!(parsed.len(), 2);
/// assert_eq!(parsed[0].segment, "club");
/// assert_eq!(parsed[0].matrix.get("name").and_then(MatrixValue::as_str), Some("lakers"));
/// assert_eq!(parsed[1].segment, "members");
/// assert_eq!(parsed[1].matrix.get("role").and_then(MatrixValue::as_str), Some("guest"));
/// ```
pub fn parse(path: &str) -> ParsedMatrix {
    parse_with(path, &ParseOptions::default())
}

/// Parses a path into its matrix representation.
///
/// The input is expected to be the path component of a request target. A
/// query component that was not stripped upstream is tolerated: everything
/// from the first `?` onward is discarded before splitting, so query content
/// can never leak into the matrix.
///
/// Parsing never fails. Malformed-looking input degrades to a defined
/// result — matrix parameters are an advisory path convention, not a strict
/// grammar — and an empty input yields an empty sequence.
pub fn parse_with(path: &str, opts: &ParseOptions) -> ParsedMatrix {
    let mut parsed = ParsedMatrix::new();
    if path.is_empty() {
        return parsed;
    }

    let path = match path.find('?') {
        Some(query) => &path[..query],
        None => path,
    };

    // The piece before the first `/` never becomes a record: a rooted path
    // contributes a leading empty piece there, and a path without any `/`
    // has no addressable segments.
    for piece in path.split('/').skip(1) {
        parsed.push(parse_segment(piece, opts));
    }

    parsed
}

fn parse_segment(piece: &str, opts: &ParseOptions) -> SegmentRecord {
    // A trailing run of `;` carries no parameters. Stripping it up front
    // keeps the separator search and the tokenizer free of end-of-piece
    // special cases.
    let piece = piece.trim_end_matches(';');

    let (segment, params) = match piece.find(';') {
        Some(sep) => (&piece[..sep], &piece[sep + 1..]),
        None => (piece, ""),
    };

    SegmentRecord {
        segment: segment.to_owned(),
        matrix: normalize::normalize(tokenize(params, opts)),
    }
}

/// Tokenizes a segment's parameter portion in a single pass: `;` separates
/// pairs, the first `=` separates key from value, and both sides are
/// percent-decoded. Whether a token carries a value is recorded here, making
/// the bare-key rule a structural property of the token stream rather than a
/// post-hoc correction.
fn tokenize(params: &str, opts: &ParseOptions) -> Vec<RawPair> {
    if params.is_empty() {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    for token in params.split(';') {
        if Some(pairs.len()) == opts.max_keys {
            break;
        }

        pairs.push(match token.find('=') {
            Some(sep) => RawPair {
                key: decode(&token[..sep]),
                value: Some(decode(&token[sep + 1..])),
            },
            None => RawPair {
                key: decode(token),
                value: None,
            },
        });
    }

    pairs
}

// Total decoding: invalid percent escapes pass through untouched and
// non-UTF-8 escape payloads are replaced rather than rejected.
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
