//! Host-catalog seam: function identifiers, resolved signatures, and the
//! lookup trait the bridge consumes. [`MemoryCatalog`] is a reference
//! implementation for running the bridge without a real host.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Opaque host identifier of a stored function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub u32);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque host identifier of a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared mode of a function argument. The bridge only ever transforms
/// values it is handed, so modes are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    In,
    Out,
    InOut,
    Variadic,
}

/// How the host is invoking the function. Trigger-style invocation is
/// rejected unconditionally by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallKind {
    #[default]
    Function,
    Trigger,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    pub kind: CallKind,
}

impl CallContext {
    pub fn function() -> Self {
        CallContext {
            kind: CallKind::Function,
        }
    }

    pub fn trigger() -> Self {
        CallContext {
            kind: CallKind::Trigger,
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.kind == CallKind::Trigger
    }
}

/// A function's catalog entry as resolved for one invocation. Immutable
/// once handed to the bridge; `source` is `None` when the catalog row has
/// no body text.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub source: Option<String>,
    pub arg_types: Vec<TypeId>,
    pub arg_names: Vec<String>,
    pub arg_modes: Vec<ArgMode>,
    pub return_type: TypeId,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("function {0} does not exist")]
    NotFound(FunctionId),
}

/// Lookup capability the host catalog provides.
pub trait FunctionCatalog {
    fn resolve_function(&self, id: FunctionId) -> Result<FunctionSignature, CatalogError>;
}

/// The host types the stylesheet contract is expressed against: which type
/// is the XML document type, and which types may receive "html"/"text"
/// output.
#[derive(Debug, Clone)]
pub struct HostTypes {
    pub document: TypeId,
    pub text_like: Vec<TypeId>,
}

impl HostTypes {
    pub fn is_document(&self, ty: TypeId) -> bool {
        self.document == ty
    }

    pub fn is_text_like(&self, ty: TypeId) -> bool {
        self.text_like.contains(&ty)
    }
}

/// In-memory catalog keyed by function id.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    functions: HashMap<FunctionId, FunctionSignature>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a function definition.
    pub fn define(&mut self, id: FunctionId, signature: FunctionSignature) {
        self.functions.insert(id, signature);
    }
}

impl FunctionCatalog for MemoryCatalog {
    fn resolve_function(&self, id: FunctionId) -> Result<FunctionSignature, CatalogError> {
        self.functions
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
