//! Converts XML text into the generic object tree consumed by `ccda-parser`.
//!
//! Shape rules:
//! - attributes become `@_name` fields,
//! - inline text of an element with attributes or children goes under `#text`,
//! - an element with neither attributes nor children becomes a plain string,
//! - repeated sibling elements become an array, a single occurrence stays bare.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

pub const ATTRIBUTE_PREFIX: &str = "@_";
pub const TEXT_KEY: &str = "#text";

#[derive(Debug, thiserror::Error)]
pub enum XmlTreeError {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("invalid attribute on <{element}>: {message}")]
    Attribute { element: String, message: String },
    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),
    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),
    #[error("document has no root element")]
    NoRootElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTreeOptions {
    /// Drop `prefix:` from element and attribute names and skip `xmlns` declarations.
    pub strip_namespace_prefix: bool,
}

impl Default for XmlTreeOptions {
    fn default() -> Self {
        Self {
            strip_namespace_prefix: true,
        }
    }
}

pub fn xml_to_tree(xml: &str) -> Result<Value, XmlTreeError> {
    xml_to_tree_with(xml, &XmlTreeOptions::default())
}

pub fn xml_to_tree_with(xml: &str, options: &XmlTreeOptions) -> Result<Value, XmlTreeError> {
    let mut reader = Reader::from_str(xml);
    // Text is trimmed per element once all of its segments are known.
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut roots = Map::new();

    loop {
        let event = reader.read_event().map_err(|err| XmlTreeError::Syntax {
            position: reader.error_position() as u64,
            message: err.to_string(),
        })?;

        match event {
            Event::Start(start) => {
                if let Some(parent) = stack.last_mut() {
                    parent.flush_text();
                }
                stack.push(Frame::open(&start, options)?);
            }
            Event::Empty(start) => {
                if let Some(parent) = stack.last_mut() {
                    parent.flush_text();
                }
                let frame = Frame::open(&start, options)?;
                attach(&mut stack, &mut roots, frame);
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    attach(&mut stack, &mut roots, frame);
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(frame) = stack.last_mut() {
                    let name = String::from_utf8_lossy(&reference).into_owned();
                    frame.text.push_str(&resolve_entity(&name)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlTreeError::UnexpectedEof(open.name.clone()));
    }
    if roots.is_empty() {
        return Err(XmlTreeError::NoRootElement);
    }
    Ok(Value::Object(roots))
}

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    segments: Vec<String>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, options: &XmlTreeOptions) -> Result<Self, XmlTreeError> {
        let raw_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let name = local_name(&raw_name, options).to_string();

        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| XmlTreeError::Attribute {
                element: raw_name.clone(),
                message: err.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if options.strip_namespace_prefix && (key == "xmlns" || key.starts_with("xmlns:")) {
                continue;
            }
            let raw_value = String::from_utf8_lossy(&attr.value).into_owned();
            let value = quick_xml::escape::unescape(&raw_value)
                .map_err(|err| XmlTreeError::Attribute {
                    element: raw_name.clone(),
                    message: err.to_string(),
                })?
                .into_owned();
            attributes.insert(
                format!("{ATTRIBUTE_PREFIX}{}", local_name(&key, options)),
                Value::String(value),
            );
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            segments: Vec::new(),
            text: String::new(),
        })
    }

    fn flush_text(&mut self) {
        let trimmed = self.text.trim();
        if !trimmed.is_empty() {
            self.segments.push(trimmed.to_string());
        }
        self.text.clear();
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(mut self) -> (String, Value) {
        self.flush_text();
        let text = self.segments.join(" ");

        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text));
        }

        let mut node = self.attributes;
        node.extend(self.children);
        if !text.is_empty() {
            node.insert(TEXT_KEY.to_string(), Value::String(text));
        }
        (self.name, Value::Object(node))
    }
}

fn attach(stack: &mut [Frame], roots: &mut Map<String, Value>, frame: Frame) {
    let (name, value) = frame.close();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => {
            roots.insert(name, value);
        }
    }
}

fn local_name<'a>(name: &'a str, options: &XmlTreeOptions) -> &'a str {
    if !options.strip_namespace_prefix {
        return name;
    }
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn resolve_entity(name: &str) -> Result<String, XmlTreeError> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(decimal) = name.strip_prefix('#') {
                decimal.parse().ok()
            } else {
                None
            };
            return code
                .and_then(char::from_u32)
                .map(String::from)
                .ok_or_else(|| XmlTreeError::UnknownEntity(name.to_string()));
        }
    };
    Ok(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_character_references() {
        assert_eq!(resolve_entity("amp").expect("amp"), "&");
        assert_eq!(resolve_entity("#160").expect("dec"), "\u{a0}");
        assert_eq!(resolve_entity("#x41").expect("hex"), "A");
        assert!(resolve_entity("nbsp").is_err());
    }

    #[test]
    fn strips_prefix_only_when_asked() {
        let strip = XmlTreeOptions::default();
        let keep = XmlTreeOptions {
            strip_namespace_prefix: false,
        };
        assert_eq!(local_name("sdtc:raceCode", &strip), "raceCode");
        assert_eq!(local_name("sdtc:raceCode", &keep), "sdtc:raceCode");
        assert_eq!(local_name("code", &strip), "code");
    }
}
