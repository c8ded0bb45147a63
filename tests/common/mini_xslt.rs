//! A deliberately tiny XSLT-subset engine backing the integration tests.
//! It understands just enough to exercise the bridge: `xsl:output` method
//! detection, a single `match="/"` template, literal result elements,
//! `xsl:value-of` over `$param` references, and `xsl:copy-of select="/"`.

use plxslt::{StylesheetParams, TransformEngine};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node};
use std::io::Cursor;
use thiserror::Error;

pub const XSLT_NS: &str = "http://www.w3.org/1999/XSL/Transform";

#[derive(Debug, Error)]
pub enum MiniXsltError {
    #[error("XML parse error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("serialized output is not valid UTF-8: {0}")]
    Output(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Unsupported(String),
}

/// A parsed document. The source text is kept so the engine can re-read it
/// with borrowed trees during `apply`.
#[derive(Debug)]
pub struct MiniDocument {
    text: String,
}

#[derive(Debug)]
pub struct MiniStylesheet {
    source: String,
    method: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MiniXslt;

impl TransformEngine for MiniXslt {
    type Document = MiniDocument;
    type Stylesheet = MiniStylesheet;
    type Error = MiniXsltError;

    fn parse_document(&self, bytes: &[u8]) -> Result<MiniDocument, MiniXsltError> {
        let text = std::str::from_utf8(bytes)?;
        Document::parse(text)?;
        Ok(MiniDocument {
            text: text.to_string(),
        })
    }

    fn compile_stylesheet(&self, document: MiniDocument) -> Result<MiniStylesheet, MiniXsltError> {
        let tree = Document::parse(&document.text)?;
        let root = tree.root_element();
        if !root.has_tag_name((XSLT_NS, "stylesheet")) && !root.has_tag_name((XSLT_NS, "transform"))
        {
            return Err(MiniXsltError::Unsupported(
                "root element is not an XSLT stylesheet".into(),
            ));
        }
        let method = root
            .children()
            .find(|n| n.has_tag_name((XSLT_NS, "output")))
            .and_then(|n| n.attribute("method"))
            .map(str::to_string);
        Ok(MiniStylesheet {
            source: document.text,
            method,
        })
    }

    fn output_method<'a>(&self, stylesheet: &'a MiniStylesheet) -> Option<&'a str> {
        stylesheet.method.as_deref()
    }

    fn apply(
        &self,
        stylesheet: &MiniStylesheet,
        input: MiniDocument,
        params: &StylesheetParams,
    ) -> Result<MiniDocument, MiniXsltError> {
        let sheet = Document::parse(&stylesheet.source)?;
        let input_tree = Document::parse(&input.text)?;
        let template = sheet
            .root_element()
            .children()
            .find(|n| n.has_tag_name((XSLT_NS, "template")) && n.attribute("match") == Some("/"))
            .ok_or_else(|| MiniXsltError::Unsupported("no match=\"/\" template".into()))?;

        let mut writer = Writer::new(Cursor::new(Vec::new()));
        emit(&mut writer, template, &input_tree, params)?;
        let text = String::from_utf8(writer.into_inner().into_inner())?;
        Ok(MiniDocument { text })
    }

    fn serialize(
        &self,
        result: MiniDocument,
        _stylesheet: &MiniStylesheet,
    ) -> Result<String, MiniXsltError> {
        Ok(result.text)
    }
}

/// Instantiates a template body: literal elements are copied, whitespace
/// between them is dropped, `xsl:value-of` and `xsl:copy-of` are expanded.
fn emit(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    node: Node,
    input: &Document,
    params: &StylesheetParams,
) -> Result<(), MiniXsltError> {
    for child in node.children() {
        if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                writer.write_event(Event::Text(BytesText::new(text.trim())))?;
            }
        } else if child.is_element() && child.tag_name().namespace() == Some(XSLT_NS) {
            match child.tag_name().name() {
                "value-of" => {
                    let select = child.attribute("select").ok_or_else(|| {
                        MiniXsltError::Unsupported("value-of without select".into())
                    })?;
                    let value = evaluate(select, input, params)?;
                    writer.write_event(Event::Text(BytesText::new(&value)))?;
                }
                "copy-of" => match child.attribute("select") {
                    Some("/") => copy_element(writer, input.root_element())?,
                    other => {
                        return Err(MiniXsltError::Unsupported(format!(
                            "copy-of select {other:?}"
                        )));
                    }
                },
                other => return Err(MiniXsltError::Unsupported(format!("xsl:{other}"))),
            }
        } else if child.is_element() {
            let name = child.tag_name().name();
            let mut start = BytesStart::new(name);
            for attr in child.attributes() {
                start.push_attribute((attr.name(), attr.value()));
            }
            if child.children().next().is_none() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                emit(writer, child, input, params)?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
    }
    Ok(())
}

fn evaluate(
    select: &str,
    input: &Document,
    params: &StylesheetParams,
) -> Result<String, MiniXsltError> {
    if let Some(name) = select.strip_prefix('$') {
        return params
            .get(name)
            .map(str::to_string)
            .ok_or_else(|| MiniXsltError::Unsupported(format!("unbound parameter ${name}")));
    }
    match select {
        "." | "/" => Ok(input
            .root_element()
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()),
        _ => Err(MiniXsltError::Unsupported(format!(
            "select expression {select:?}"
        ))),
    }
}

fn copy_element(writer: &mut Writer<Cursor<Vec<u8>>>, node: Node) -> Result<(), MiniXsltError> {
    let name = node.tag_name().name();
    let mut start = BytesStart::new(name);
    for attr in node.attributes() {
        start.push_attribute((attr.name(), attr.value()));
    }
    if node.children().next().is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for child in node.children() {
        if child.is_element() {
            copy_element(writer, child)?;
        } else if child.is_text() {
            writer.write_event(Event::Text(BytesText::new(child.text().unwrap_or(""))))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
