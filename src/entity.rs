use std::borrow::Cow;

use crate::error::Error;

/// Replace predefined entities and character references.
pub(crate) fn parse_entities(content: &str) -> Result<Cow<'_, str>, Error> {
    if !content.contains('&') {
        return Ok(Cow::Borrowed(content));
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }
        let mut entity = String::new();
        let mut is_complete = false;
        for c in chars.by_ref() {
            if c == ';' {
                is_complete = true;
                break;
            }
            entity.push(c);
        }
        if !is_complete {
            return Err(Error::UnclosedEntity(entity));
        }
        match entity.as_str() {
            "amp" => result.push('&'),
            "apos" => result.push('\''),
            "gt" => result.push('>'),
            "lt" => result.push('<'),
            "quot" => result.push('"'),
            _ => result.push(parse_char_reference(&entity)?),
        }
    }
    Ok(Cow::Owned(result))
}

/// Normalize an attribute value: literal tabs and line breaks become
/// spaces before entities are replaced, so `&#10;` still gives a newline.
pub(crate) fn parse_attribute(content: &str) -> Result<Cow<'_, str>, Error> {
    if !content.contains(['\t', '\n', '\r']) {
        return parse_entities(content);
    }
    let normalized = content
        .replace("\r\n", " ")
        .replace(['\t', '\n', '\r'], " ");
    Ok(Cow::Owned(parse_entities(&normalized)?.into_owned()))
}

fn parse_char_reference(entity: &str) -> Result<char, Error> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(decimal) = entity.strip_prefix('#') {
        decimal.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}

pub(crate) fn serialize_text(content: &str) -> Cow<'_, str> {
    escape(content, false)
}

pub(crate) fn serialize_attribute(content: &str) -> Cow<'_, str> {
    escape(content, true)
}

fn escape(content: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| match c {
        '&' | '<' | '>' | '\r' => true,
        '"' | '\n' | '\t' => attribute,
        _ => false,
    };
    if !content.chars().any(needs_escape) {
        return Cow::Borrowed(content);
    }
    let mut result = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if attribute => result.push_str("&quot;"),
            '\n' if attribute => result.push_str("&#10;"),
            '\t' if attribute => result.push_str("&#9;"),
            '\r' => result.push_str("&#13;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
