//! Resolving a function's catalog entry into an execution contract, and
//! cross-checking that contract against the stylesheet's declared output
//! method.

use crate::catalog::{ArgMode, FunctionCatalog, FunctionId, HostTypes, TypeId};
use crate::engine::OutputMethod;
use crate::error::PlXsltError;
use log::debug;
use std::collections::HashSet;

/// A resolved, precondition-checked signature plus its stylesheet source
/// with the optional leading blank line already stripped.
#[derive(Debug, Clone)]
pub struct Contract {
    pub source: String,
    pub arg_types: Vec<TypeId>,
    pub arg_names: Vec<String>,
    pub arg_modes: Vec<ArgMode>,
    pub return_type: TypeId,
}

/// Fetches the function's catalog entry and enforces the signature
/// preconditions: at least one argument, document-typed first argument,
/// distinct names for the arguments that become stylesheet parameters.
pub fn resolve(
    catalog: &impl FunctionCatalog,
    host_types: &HostTypes,
    id: FunctionId,
) -> Result<Contract, PlXsltError> {
    let signature = catalog.resolve_function(id)?;
    let source = signature.source.ok_or(PlXsltError::MissingSource(id))?;
    let source = strip_leading_blank_line(source);

    if signature.arg_types.is_empty() {
        return Err(PlXsltError::InvalidSignature(
            "XSLT function must have at least one argument".into(),
        ));
    }
    if signature.arg_names.len() != signature.arg_types.len()
        || signature.arg_modes.len() != signature.arg_types.len()
    {
        return Err(PlXsltError::InvalidSignature(
            "argument names and modes must match the argument types".into(),
        ));
    }
    if !host_types.is_document(signature.arg_types[0]) {
        return Err(PlXsltError::InvalidSignature(
            "first argument of XSLT function must have type XML".into(),
        ));
    }

    // Arguments after the first become stylesheet parameters keyed by name.
    let mut seen = HashSet::new();
    for name in &signature.arg_names[1..] {
        if !seen.insert(name.as_str()) {
            return Err(PlXsltError::InvalidSignature(format!(
                "duplicate argument name \"{name}\""
            )));
        }
    }

    debug!(
        "resolved function {id}: {} argument(s), return type {}",
        signature.arg_types.len(),
        signature.return_type
    );

    Ok(Contract {
        source,
        arg_types: signature.arg_types,
        arg_names: signature.arg_names,
        arg_modes: signature.arg_modes,
        return_type: signature.return_type,
    })
}

/// A stylesheet source may start with one blank line for readability.
/// Exactly one leading newline is removed, never other whitespace.
fn strip_leading_blank_line(source: String) -> String {
    match source.strip_prefix('\n') {
        Some(rest) => rest.to_string(),
        None => source,
    }
}

/// The output-method/return-type rule table. Runs identically in
/// validation-only and execute modes, always before any transformation
/// work.
pub fn check_output_contract(
    host_types: &HostTypes,
    method: OutputMethod,
    return_type: TypeId,
) -> Result<(), PlXsltError> {
    match method {
        OutputMethod::Xml => {
            if !host_types.is_document(return_type) {
                return Err(PlXsltError::OutputTypeMismatch {
                    method,
                    required: "xml",
                });
            }
        }
        OutputMethod::Html | OutputMethod::Text => {
            if !host_types.is_text_like(return_type) {
                return Err(PlXsltError::OutputTypeMismatch {
                    method,
                    required: "text or varchar",
                });
            }
        }
    }
    Ok(())
}
