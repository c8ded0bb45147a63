//! Type Conversion Adapter seam: per-type text encode/decode, looked up by
//! type identifier. [`ScalarCodecs`] is a reference implementation over a
//! small scalar value model.

use crate::catalog::{HostTypes, TypeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("no conversion registered for type {0}")]
    UnknownType(TypeId),

    #[error("invalid input for type {ty}: {message}")]
    Malformed { ty: TypeId, message: String },
}

/// Conversion between the host's typed values and text, in both
/// directions, per type identifier.
pub trait TypeCodecs {
    type Value;

    /// Renders a typed value as text.
    fn encode(&self, value: &Self::Value, ty: TypeId) -> Result<String, CodecError>;

    /// Parses text into a value of the target type.
    fn decode(&self, text: &str, ty: TypeId) -> Result<Self::Value, CodecError>;

    /// Raw encoded bytes of a document-typed value, fed to the engine's
    /// document parser.
    fn document_bytes<'a>(&self, value: &'a Self::Value) -> Result<&'a [u8], CodecError>;
}

/// Well-known type identifiers of the reference host model.
pub const XML: TypeId = TypeId(142);
pub const TEXT: TypeId = TypeId(25);
pub const VARCHAR: TypeId = TypeId(1043);
pub const INTEGER: TypeId = TypeId(23);

/// A value in the reference host model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    Xml(String),
    Text(String),
    Integer(i64),
}

/// Reference codecs covering the well-known types above.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarCodecs;

impl ScalarCodecs {
    /// Contract types of the reference host: `XML` is the document type,
    /// `TEXT` and `VARCHAR` are the text-like return types.
    pub fn host_types() -> HostTypes {
        HostTypes {
            document: XML,
            text_like: vec![TEXT, VARCHAR],
        }
    }
}

impl TypeCodecs for ScalarCodecs {
    type Value = ScalarValue;

    fn encode(&self, value: &ScalarValue, ty: TypeId) -> Result<String, CodecError> {
        match (ty, value) {
            (XML, ScalarValue::Xml(s)) => Ok(s.clone()),
            (TEXT | VARCHAR, ScalarValue::Text(s)) => Ok(s.clone()),
            (INTEGER, ScalarValue::Integer(n)) => Ok(n.to_string()),
            (XML | TEXT | VARCHAR | INTEGER, other) => Err(CodecError::Malformed {
                ty,
                message: format!("value {other:?} does not have this type"),
            }),
            _ => Err(CodecError::UnknownType(ty)),
        }
    }

    fn decode(&self, text: &str, ty: TypeId) -> Result<ScalarValue, CodecError> {
        match ty {
            XML => Ok(ScalarValue::Xml(text.to_string())),
            TEXT | VARCHAR => Ok(ScalarValue::Text(text.to_string())),
            INTEGER => text
                .trim()
                .parse::<i64>()
                .map(ScalarValue::Integer)
                .map_err(|e| CodecError::Malformed {
                    ty,
                    message: e.to_string(),
                }),
            _ => Err(CodecError::UnknownType(ty)),
        }
    }

    fn document_bytes<'a>(&self, value: &'a ScalarValue) -> Result<&'a [u8], CodecError> {
        match value {
            ScalarValue::Xml(s) => Ok(s.as_bytes()),
            other => Err(CodecError::Malformed {
                ty: XML,
                message: format!("value {other:?} is not a document"),
            }),
        }
    }
}
