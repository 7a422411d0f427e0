use std::borrow::Cow;

use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::Error;

pub(crate) fn encoding(data: &[u8], hint: Option<String>) -> Option<&'static Encoding> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, hint).ok()?;
    // no encoding detected
    let label = if charsets.is_empty() {
        "UTF-8"
    } else {
        &charsets[0]
    };
    Encoding::for_label(label.as_bytes())
}

/// Decode a byte stream into text, using its byte order mark or XML
/// declaration to pick the encoding. Falls back to UTF-8.
pub(crate) fn decode(data: &[u8]) -> Result<Cow<'_, str>, Error> {
    let encoding = encoding(data, None).unwrap_or(encoding_rs::UTF_8);
    let (text, used, had_errors) = encoding.decode(data);
    if had_errors {
        return Err(Error::Decoding(used.name()));
    }
    Ok(text)
}
