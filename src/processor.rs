//! Top-level dispatch. [`PlXslt`] wires the three host collaborators
//! together and exposes the two entry points the host calls: `validate`
//! for create-time checking and `handle` for query-time execution.
//!
//! Every invocation recompiles the stylesheet from the catalog source;
//! nothing is cached or shared across calls, so repeated calls are
//! independent by construction.

use crate::catalog::{CallContext, FunctionCatalog, FunctionId, HostTypes};
use crate::codec::TypeCodecs;
use crate::contract::{self, Contract};
use crate::engine::{OutputMethod, StylesheetParams, TransformEngine};
use crate::error::PlXsltError;
use crate::params;
use log::debug;

/// The language bridge, wired to its host collaborators: the function
/// catalog, the per-type codecs, and the transformation engine.
pub struct PlXslt<C, X, E> {
    catalog: C,
    codecs: X,
    engine: E,
    host_types: HostTypes,
}

/// Releases engine-global transformation state when an invocation ends,
/// on every exit path.
struct EngineScope<'a, E: TransformEngine>(&'a E);

impl<'a, E: TransformEngine> Drop for EngineScope<'a, E> {
    fn drop(&mut self) {
        self.0.reset();
    }
}

impl<C, X, E> PlXslt<C, X, E>
where
    C: FunctionCatalog,
    X: TypeCodecs,
    E: TransformEngine,
{
    pub fn new(catalog: C, codecs: X, engine: E, host_types: HostTypes) -> Self {
        PlXslt {
            catalog,
            codecs,
            engine,
            host_types,
        }
    }

    /// Validate-only entry point: resolves the signature, compiles the
    /// stylesheet, and checks the output contract. Performs no
    /// transformation and touches no call arguments.
    pub fn validate(&self, id: FunctionId) -> Result<(), PlXsltError> {
        let _scope = EngineScope(&self.engine);
        self.check(id)?;
        Ok(())
    }

    /// Full entry point: validates, transforms the first argument with the
    /// remaining arguments bound as stylesheet parameters, and converts the
    /// serialized result to the declared return type. Trigger-style
    /// invocation is rejected unconditionally.
    pub fn handle(
        &self,
        id: FunctionId,
        context: CallContext,
        args: &[X::Value],
    ) -> Result<X::Value, PlXsltError> {
        if context.is_trigger() {
            return Err(PlXsltError::UnsupportedInvocation);
        }

        let _scope = EngineScope(&self.engine);
        let (contract, stylesheet) = self.check(id)?;

        if args.len() != contract.arg_types.len() {
            return Err(PlXsltError::InvalidSignature(format!(
                "function {id} declares {} argument(s) but the call supplied {}",
                contract.arg_types.len(),
                args.len()
            )));
        }

        let params = params::marshal(&self.codecs, &contract, args)?;
        let input = self.codecs.document_bytes(&args[0]).map_err(|e| {
            PlXsltError::InvalidSignature(format!("first argument is not a document value: {e}"))
        })?;
        let text = self.transform(&stylesheet, input, &params)?;

        debug!("function {id} produced {} byte(s) of output", text.len());
        let value = self.codecs.decode(&text, contract.return_type)?;
        Ok(value)
    }

    /// The shared validate chain: resolve, compile, check the output
    /// contract. Both entry points run this before anything else.
    fn check(&self, id: FunctionId) -> Result<(Contract, E::Stylesheet), PlXsltError> {
        let contract = contract::resolve(&self.catalog, &self.host_types, id)?;
        let stylesheet = self.compile(&contract.source)?;
        let method = OutputMethod::resolve(self.engine.output_method(&stylesheet));
        contract::check_output_contract(&self.host_types, method, contract.return_type)?;
        debug!("function {id} validated: output method \"{method}\"");
        Ok((contract, stylesheet))
    }

    fn compile(&self, source: &str) -> Result<E::Stylesheet, PlXsltError> {
        let document = self
            .engine
            .parse_document(source.as_bytes())
            .map_err(|e| PlXsltError::StylesheetParse(e.to_string()))?;
        self.engine
            .compile_stylesheet(document)
            .map_err(|e| PlXsltError::StylesheetCompile(e.to_string()))
    }

    fn transform(
        &self,
        stylesheet: &E::Stylesheet,
        input: &[u8],
        params: &StylesheetParams,
    ) -> Result<String, PlXsltError> {
        let input_doc = self
            .engine
            .parse_document(input)
            .map_err(|e| PlXsltError::InputParse(e.to_string()))?;
        let result = self
            .engine
            .apply(stylesheet, input_doc, params)
            .map_err(|e| PlXsltError::Transform(e.to_string()))?;
        self.engine
            .serialize(result, stylesheet)
            .map_err(|e| PlXsltError::Serialization(e.to_string()))
    }
}
