//! Procedural-language bridge for stored database functions whose body is
//! an XSLT stylesheet.
//!
//! The host asks the bridge to do two things: validate a candidate
//! function definition at creation time, and execute the function body
//! against call arguments at query time. The first argument is always the
//! XML document to transform; the remaining arguments are bound as
//! stylesheet parameters; the serialized result is converted back into the
//! function's declared return type.
//!
//! The host catalog, the per-type text codecs, and the XSLT engine itself
//! are external collaborators behind the [`FunctionCatalog`],
//! [`TypeCodecs`], and [`TransformEngine`] traits, so the bridge runs
//! against any host and stays testable without one. [`MemoryCatalog`] and
//! [`ScalarCodecs`] are in-crate reference implementations of the first
//! two.

pub mod catalog;
pub mod codec;
pub mod contract;
pub mod engine;
pub mod error;
pub mod params;
pub mod processor;

pub use catalog::{
    ArgMode, CallContext, CallKind, FunctionCatalog, FunctionId, FunctionSignature, HostTypes,
    MemoryCatalog, TypeId,
};
pub use codec::{CodecError, ScalarCodecs, ScalarValue, TypeCodecs};
pub use engine::{OutputMethod, StylesheetParams, TransformEngine};
pub use error::PlXsltError;
pub use processor::PlXslt;
