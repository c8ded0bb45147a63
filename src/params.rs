//! Parameter Marshaller: converts call arguments after the document
//! argument into the engine's ordered name/value bindings.

use crate::codec::{CodecError, TypeCodecs};
use crate::contract::Contract;
use crate::engine::StylesheetParams;
use crate::error::PlXsltError;

/// Encodes each argument after the first via the per-type codec and pairs
/// it with its declared name, preserving declaration order. The caller has
/// already checked that `args` matches the contract's arity.
pub fn marshal<X: TypeCodecs>(
    codecs: &X,
    contract: &Contract,
    args: &[X::Value],
) -> Result<StylesheetParams, PlXsltError> {
    let mut params = StylesheetParams::new();
    for (i, value) in args.iter().enumerate().skip(1) {
        let name = contract.arg_names[i].as_str();
        let text = codecs
            .encode(value, contract.arg_types[i])
            .map_err(|e| argument_error(name, e))?;
        params.push(name, text);
    }
    Ok(params)
}

/// A call argument that cannot be encoded as its declared type means the
/// call does not match the signature it was resolved against.
fn argument_error(name: &str, e: CodecError) -> PlXsltError {
    match e {
        CodecError::UnknownType(ty) => PlXsltError::UnknownType(ty),
        CodecError::Malformed { message, .. } => PlXsltError::InvalidSignature(format!(
            "argument \"{name}\" does not match its declared type: {message}"
        )),
    }
}
