//! Inlines JSON modules into the code that imports them.
//!
//! `import data from './data.json'` and `const data = require('./data.json')`
//! (plus their destructuring forms) become plain declarations whose
//! initializers are the literal JSON content, so nothing is resolved or read
//! at runtime.

use std::path::{Path, PathBuf};

use swc_core::{
    common::{errors::HANDLER, Span, DUMMY_SP},
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{
        metadata::TransformPluginMetadataContextKind, plugin_transform,
        proxies::TransformPluginProgramMetadata,
    },
};

pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod rewriter;
pub mod shape;

pub use config::{Config, MatchPattern};
pub use error::{ConfigError, DestructureError, Error, LoadError};
pub use rewriter::InlineJsonImports;

/// Filename SWC reports when the source has no location.
const UNKNOWN_FILENAME: &str = "unknown";

/// Rewrites every eligible declaration in `program`.
///
/// `filename` is the file being transformed; JSON paths resolve against its
/// directory, or against the working directory when it is `None`.
pub fn inline_json_imports(
    program: &mut Program,
    matcher: &MatchPattern,
    filename: Option<&Path>,
) -> Result<(), Error> {
    let mut transform = InlineJsonImports::new(matcher.clone(), filename.map(Path::to_path_buf));
    program.visit_mut_with(&mut transform);
    transform.finish().map_err(|(_, err)| err)
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

fn report(span: Span, err: &Error) {
    HANDLER.with(|handler| handler.struct_span_err(span, &err.to_string()).emit());
}

/// Location of the file being transformed; `None` when SWC does not know it.
fn known_filename(name: Option<String>) -> Option<PathBuf> {
    name.filter(|name| name != UNKNOWN_FILENAME)
        .map(PathBuf::from)
}

/// Matcher described by the raw plugin config, if any was given.
fn matcher_from_plugin_config(raw: Option<&str>) -> Result<MatchPattern, ConfigError> {
    let config = Config::from_json(raw.unwrap_or_default())?;
    MatchPattern::from_config(&config)
}

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let config = metadata.get_transform_plugin_config();
    let matcher = match matcher_from_plugin_config(config.as_deref()) {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::warn!(error = %err, "invalid inline-json-imports config");
            report(DUMMY_SP, &err.into());
            return program;
        }
    };

    let filename =
        known_filename(metadata.get_context(&TransformPluginMetadataContextKind::Filename));
    let mut transform = InlineJsonImports::new(matcher, filename);
    program.visit_mut_with(&mut transform);
    if let Err((span, err)) = transform.finish() {
        report(span, &err);
    }

    program
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filename_means_no_location() {
        assert_eq!(known_filename(Some("unknown".into())), None);
        assert_eq!(known_filename(None), None);
        assert_eq!(
            known_filename(Some("/app/src/index.js".into())),
            Some(PathBuf::from("/app/src/index.js"))
        );
    }

    #[test]
    fn missing_plugin_config_uses_default_matcher() {
        let matcher = matcher_from_plugin_config(None).unwrap();
        assert!(matcher.is_match("./a.JSON"));
        let matcher = matcher_from_plugin_config(Some("{}")).unwrap();
        assert!(matcher.is_match("./a.json!json"));
    }

    #[test]
    fn plugin_config_errors_surface() {
        assert!(matches!(
            matcher_from_plugin_config(Some("{not json")),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            matcher_from_plugin_config(Some(r#"{"match": "x", "matchFlags": "z"}"#)),
            Err(ConfigError::Flag { flag: 'z' })
        ));
        assert!(matches!(
            matcher_from_plugin_config(Some(r#"{"match": "("}"#)),
            Err(ConfigError::Pattern { .. })
        ));
    }

    #[test]
    fn plugin_config_drives_matching() {
        let matcher =
            matcher_from_plugin_config(Some(r#"{"match": "\\.data$", "matchFlags": "i"}"#))
                .unwrap();
        assert!(matcher.is_match("./x.DATA"));
        assert!(!matcher.is_match("./x.json"));
    }
}
