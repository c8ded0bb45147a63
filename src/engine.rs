//! Transformation-engine seam. Stylesheet compilation, tree construction,
//! and the apply-stylesheet algorithm live behind [`TransformEngine`]; the
//! bridge never looks inside the engine's document or stylesheet types.

use std::fmt;

/// The stylesheet's declared result format, post-default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMethod {
    Xml,
    Html,
    Text,
}

impl OutputMethod {
    /// Resolves the engine-reported declaration. An absent or unrecognized
    /// method counts as "xml". The true default may resolve to "html" only
    /// at run time; the bridge does not attempt that resolution, and uses
    /// this static reading in both validation and execution.
    pub fn resolve(declared: Option<&str>) -> Self {
        match declared {
            Some("html") => OutputMethod::Html,
            Some("text") => OutputMethod::Text,
            _ => OutputMethod::Xml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMethod::Xml => "xml",
            OutputMethod::Html => "html",
            OutputMethod::Text => "text",
        }
    }
}

impl fmt::Display for OutputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered name/value parameter bindings, one per argument after the
/// document argument, in declaration order. Lives for a single execution
/// call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetParams(Vec<(String, String)>);

impl StylesheetParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Black-box XSLT capability the bridge drives. Documents and stylesheets
/// are owned by one invocation and dropped when it ends; nothing is cached
/// across calls.
pub trait TransformEngine {
    type Document;
    type Stylesheet;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds a document tree from raw bytes.
    fn parse_document(&self, bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Compiles a parsed document into a stylesheet.
    fn compile_stylesheet(&self, document: Self::Document) -> Result<Self::Stylesheet, Self::Error>;

    /// The output method the stylesheet declares, if any.
    fn output_method<'a>(&self, stylesheet: &'a Self::Stylesheet) -> Option<&'a str>;

    /// Applies the stylesheet to the input document with the given
    /// parameter bindings.
    fn apply(
        &self,
        stylesheet: &Self::Stylesheet,
        input: Self::Document,
        params: &StylesheetParams,
    ) -> Result<Self::Document, Self::Error>;

    /// Serializes a result document to text per the stylesheet's output
    /// method.
    fn serialize(&self, result: Self::Document, stylesheet: &Self::Stylesheet)
    -> Result<String, Self::Error>;

    /// Releases any engine-global state acquired during the invocation.
    /// Called once per invocation, on every exit path.
    fn reset(&self) {}
}
