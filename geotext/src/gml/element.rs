use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::GeoTextError;

/// In-memory subtree of a geometry element.
///
/// Names are local names, namespace prefixes are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<GmlElement>,
}

impl GmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, GeoTextError> {
        let mut attributes = vec![];
        for attribute in start.attributes() {
            let attribute = attribute?;
            attributes.push((
                decode_name(attribute.key.local_name().as_ref()).into_owned(),
                attribute.unescape_value()?.into_owned(),
            ));
        }

        Ok(Self {
            name: local_name(start).into_owned(),
            attributes,
            text: String::new(),
            children: vec![],
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&GmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Reads the element that starts with `start` up to its end tag.
    ///
    /// `depth` is the number of elements already open around `start`.
    pub fn read(
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
        is_empty: bool,
        depth: usize,
        max_depth: usize,
    ) -> Result<Self, GeoTextError> {
        let root = Self::from_start(start)?;
        if is_empty {
            return Ok(root);
        }

        let mut stack = vec![root];
        loop {
            let event = reader.read_event()?;
            let opens_element = matches!(event, Event::Start(_) | Event::Empty(_));
            if opens_element && depth + stack.len() >= max_depth {
                return Err(GeoTextError::NestingTooDeep { max_depth });
            }

            let Some(current) = stack.last_mut() else {
                break;
            };

            match event {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => current.children.push(Self::from_start(&e)?),
                Event::Text(e) => append_text(&mut current.text, &e.unescape()?),
                Event::CData(e) => append_text(&mut current.text, &String::from_utf8_lossy(&e)),
                Event::End(_) => {
                    let Some(element) = stack.pop() else {
                        break;
                    };

                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Eof => return Err(GeoTextError::UnclosedElement(current.name.clone())),
                _ => {}
            }
        }

        Err(GeoTextError::InvalidGeometry(
            "element ended unexpectedly".into(),
        ))
    }
}

/// Local name of the element as a string.
pub(crate) fn local_name<'a>(start: &'a BytesStart<'_>) -> Cow<'a, str> {
    decode_name(start.local_name().into_inner())
}

/// Appends a text chunk of an element.
///
/// Chunks split by comments or CDATA sections are trimmed by the reader, so they are separated with a
/// space unless whitespace is already there.
pub(crate) fn append_text(text: &mut String, chunk: &str) {
    let needs_separator = text.chars().next_back().is_some_and(|c| !c.is_whitespace())
        && chunk.chars().next().is_some_and(|c| !c.is_whitespace());
    if needs_separator {
        text.push(' ');
    }
    text.push_str(chunk);
}

fn decode_name(name: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(name)
}
