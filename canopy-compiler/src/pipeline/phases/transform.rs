//! Transform phase - rewrites the schema trees for the chosen policy.

use eyre::Result;

use crate::{
    CompileError,
    pipeline::{CompilationContext, Phase},
    retarget,
};

/// Phase that retargets config-pointing leafrefs when operational state is
/// preferred. A no-op for every other policy.
pub struct TransformPhase;

impl Phase for TransformPhase {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn description(&self) -> &'static str {
        "Retarget cross-references to the preferred container"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<Vec<CompileError>> {
        let policy = ctx.policy;
        let mut errors = Vec::new();
        for module in ctx.modules.iter_mut() {
            errors.extend(retarget(module.root_mut(), policy));
        }
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use canopy_schema::{Module, ModuleSet, SchemaNode, TypeDescriptor};

    use super::*;
    use crate::CompileOptions;

    fn modules(path: &str) -> ModuleSet {
        ModuleSet::new([Module::new(
            "m",
            [SchemaNode::list("entry", ["id"]).with_children([
                SchemaNode::leaf(
                    "id",
                    TypeDescriptor::Leafref {
                        path: path.into(),
                    },
                ),
                SchemaNode::container("config")
                    .with_child(SchemaNode::leaf("id", TypeDescriptor::Uint32)),
            ])],
        )])
    }

    fn leafref_path(ctx: &CompilationContext) -> Option<&str> {
        ctx.modules.modules[0].root().children["entry"].children["id"]
            .ty
            .as_ref()
            .and_then(TypeDescriptor::leafref_path)
    }

    fn options(prefer_operational_state: bool) -> CompileOptions {
        CompileOptions {
            compress_paths: true,
            prefer_operational_state,
            ..CompileOptions::default()
        }
    }

    #[test]
    fn test_retargets_under_operational_state() {
        let mut ctx =
            CompilationContext::new(modules("../config/id"), options(true)).expect("valid");
        let errors = TransformPhase.run(&mut ctx).expect("transform");
        assert!(errors.is_empty());
        assert_eq!(leafref_path(&ctx), Some("../state/id"));
    }

    #[test]
    fn test_untouched_otherwise() {
        let mut ctx =
            CompilationContext::new(modules("../config/id"), options(false)).expect("valid");
        TransformPhase.run(&mut ctx).expect("transform");
        assert_eq!(leafref_path(&ctx), Some("../config/id"));
    }

    #[test]
    fn test_empty_reference_is_not_fatal() {
        let mut ctx = CompilationContext::new(modules(""), options(true)).expect("valid");
        let errors = TransformPhase.run(&mut ctx).expect("transform");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            CompileError::UnresolvableCrossReference { .. }
        ));
        assert!(!errors[0].is_fatal());
    }
}
