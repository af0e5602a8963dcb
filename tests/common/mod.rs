#![allow(dead_code)]

use std::path::{Path, PathBuf};

use inline_json_imports_swc_plugin::{inline_json_imports, Error, MatchPattern};
use swc_core::{
    common::{sync::Lrc, FileName, SourceMap},
    ecma::{
        ast::{EsVersion, Module, Program},
        codegen::{text_writer::JsWriter, Config as CodegenConfig, Emitter},
        parser::{parse_file_as_module, EsSyntax, Syntax},
    },
};

pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A source file living next to the fixtures; it never has to exist.
pub fn entry() -> PathBuf {
    fixtures().join("entry.js")
}

fn parse(cm: &Lrc<SourceMap>, src: &str) -> Module {
    let fm = cm.new_source_file(FileName::Anon.into(), src.to_string());
    parse_file_as_module(
        &fm,
        Syntax::Es(EsSyntax::default()),
        EsVersion::EsNext,
        None,
        &mut vec![],
    )
    .unwrap_or_else(|err| panic!("failed to parse {src:?}: {err:?}"))
}

fn print(cm: &Lrc<SourceMap>, module: &Module) -> String {
    let mut buf = vec![];
    {
        let mut emitter = Emitter {
            cfg: CodegenConfig::default().with_minify(true),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        emitter.emit_module(module).expect("module prints");
    }
    String::from_utf8(buf).expect("codegen emits utf-8")
}

/// Source in a canonical printed form, so layout and quoting never matter.
pub fn normalize(src: &str) -> String {
    let cm: Lrc<SourceMap> = Default::default();
    let module = parse(&cm, src);
    print(&cm, &module)
}

/// Runs the rewrite and returns the printed result.
pub fn transform_with(
    src: &str,
    filename: Option<&Path>,
    matcher: &MatchPattern,
) -> Result<String, Error> {
    let (result, _) = transform_keeping_output(src, filename, matcher);
    result
}

/// Like [`transform_with`], but also hands back the tree as it was left,
/// even when the rewrite failed.
pub fn transform_keeping_output(
    src: &str,
    filename: Option<&Path>,
    matcher: &MatchPattern,
) -> (Result<String, Error>, String) {
    let cm: Lrc<SourceMap> = Default::default();
    let mut program = Program::Module(parse(&cm, src));
    let result = inline_json_imports(&mut program, matcher, filename);
    let Program::Module(module) = program else {
        unreachable!("parsed as a module");
    };
    let printed = print(&cm, &module);
    (result.map(|_| printed.clone()), printed)
}

pub fn transform(src: &str) -> Result<String, Error> {
    transform_with(src, Some(&entry()), &MatchPattern::default())
}
