use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// A parsed module together with the text it was parsed from.
///
/// Spans reported by swc are positions in a shared source map; `offset`
/// converts them back to byte offsets into `code`.
pub struct ParsedSource {
    pub module: Module,
    pub code: String,
    start_pos: BytePos,
}

impl ParsedSource {
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize
    }

    pub fn range(&self, span: Span) -> (usize, usize) {
        (self.offset(span.lo), self.offset(span.hi))
    }

    pub fn snippet(&self, span: Span) -> &str {
        let (start, end) = self.range(span);
        &self.code[start..end]
    }
}

/// Parse a JS/TS source file. `.ts` files are parsed without JSX so that
/// angle-bracket generics and casts are accepted.
pub fn parse_source(code: &str, file_path: &Path) -> Result<ParsedSource> {
    let tsx = file_path.extension().and_then(|e| e.to_str()) != Some("ts");
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.to_path_buf()).into(),
            code.to_string(),
        );

        let syntax = Syntax::Typescript(TsSyntax {
            tsx,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("{:?}", e.kind()))?;

        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(anyhow!("{:?}", err.kind()));
        }

        Ok(ParsedSource {
            module,
            code: code.to_string(),
            start_pos: source_file.start_pos,
        })
    })
}
