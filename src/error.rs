use crate::catalog::{CatalogError, FunctionId, TypeId};
use crate::codec::CodecError;
use crate::engine::OutputMethod;
use thiserror::Error;

/// Every way an invocation can fail, raised at the point of detection and
/// never retried. Engine and codec detail is carried as the collaborator's
/// rendered message.
#[derive(Error, Debug)]
pub enum PlXsltError {
    #[error("function {0} does not exist")]
    NotFound(FunctionId),

    #[error("trigger functions not supported")]
    UnsupportedInvocation,

    #[error("function {0} has no source text")]
    MissingSource(FunctionId),

    #[error("invalid XSLT function signature: {0}")]
    InvalidSignature(String),

    #[error("could not parse stylesheet: {0}")]
    StylesheetParse(String),

    #[error("could not compile stylesheet: {0}")]
    StylesheetCompile(String),

    #[error(
        "XSLT stylesheet has output method \"{method}\" but return type of function is not {required}"
    )]
    OutputTypeMismatch {
        method: OutputMethod,
        required: &'static str,
    },

    #[error("could not parse input document: {0}")]
    InputParse(String),

    #[error("stylesheet transformation failed: {0}")]
    Transform(String),

    #[error("result serialization failed: {0}")]
    Serialization(String),

    #[error("could not convert result to return type {ty}: {message}")]
    ResultDecode { ty: TypeId, message: String },

    #[error("no conversion registered for type {0}")]
    UnknownType(TypeId),
}

impl From<CatalogError> for PlXsltError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => PlXsltError::NotFound(id),
        }
    }
}

impl From<CodecError> for PlXsltError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::UnknownType(ty) => PlXsltError::UnknownType(ty),
            CodecError::Malformed { ty, message } => PlXsltError::ResultDecode { ty, message },
        }
    }
}
