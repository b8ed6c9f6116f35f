use std::io::IsTerminal;
use std::process::ExitCode;

use annotate_snippets::AnnotationKind;
use annotate_snippets::Level;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;
use lqd_conf::ErrorMode;
use lqd_syntax::parse_variable;
use lqd_syntax::ParseContext;
use lqd_syntax::ParseError;

use crate::args::Args;
use crate::commands::load_settings;
use crate::commands::Command;
use crate::extract::output_tags;
use crate::walk::is_template;
use crate::walk::walk_files;

#[derive(Debug, Parser)]
pub struct Check {
    /// Files or directories to check.
    #[arg(default_value = ".")]
    paths: Vec<Utf8PathBuf>,

    /// Error mode to check with; overrides the configured one. Lax reports
    /// nothing, warn reports strict violations as warnings.
    #[arg(long, short)]
    mode: Option<ErrorMode>,
}

impl Command for Check {
    fn execute(&self, _args: &Args) -> Result<ExitCode> {
        let settings = load_settings(self.mode)?;
        let files = walk_files(&self.paths, is_template);
        tracing::info!(files = files.len(), mode = %settings.error_mode, "Checking templates");

        let renderer = pick_renderer();
        let mut error_count: usize = 0;
        let mut file_count: usize = 0;

        for path in &files {
            let Some(source) = read_source(path) else {
                continue;
            };
            let diagnostics = check_source(&source, settings.error_mode);
            if diagnostics.is_empty() {
                continue;
            }

            file_count += 1;
            for diagnostic in &diagnostics {
                println!("{}\n", diagnostic.render(&source, path, &renderer));
                if diagnostic.severity == Severity::Error {
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            let file_word = if file_count == 1 { "file" } else { "files" };
            let error_word = if error_count == 1 { "error" } else { "errors" };
            eprintln!("Found {error_count} {error_word} in {file_count} {file_word}.");
            Ok(ExitCode::FAILURE)
        } else {
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read a template, replacing invalid UTF-8. Unreadable files are skipped.
fn read_source(path: &Utf8Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            tracing::warn!("Skipping {path}: {err}");
            None
        }
    }
}

fn pick_renderer() -> Renderer {
    if std::io::stdout().is_terminal() {
        Renderer::styled()
    } else {
        Renderer::plain()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

#[derive(Debug)]
struct Diagnostic {
    severity: Severity,
    /// Byte offset of the offending fragment within the checked source.
    offset: usize,
    error: ParseError,
}

impl Diagnostic {
    fn render(&self, source: &str, path: &Utf8Path, renderer: &Renderer) -> String {
        let level = match self.severity {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let span = self.offset..self.offset + self.error.fragment().len();
        let label = self.error.kind().to_string();

        let snippet = Snippet::source(source)
            .path(path.as_str())
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(span).label(label.as_str()));

        let report = &[level
            .primary_title("Malformed expression in output tag")
            .element(snippet)];
        renderer.render(report)
    }
}

fn check_source(source: &str, mode: ErrorMode) -> Vec<Diagnostic> {
    let severity = match mode {
        ErrorMode::Lax => return Vec::new(),
        ErrorMode::Warn => Severity::Warning,
        ErrorMode::Strict => Severity::Error,
    };

    let context = ParseContext::strict();
    output_tags(source)
        .into_iter()
        .filter_map(|tag| {
            let error = parse_variable(tag.markup, &context).err()?;
            Some(Diagnostic {
                severity,
                offset: tag.offset + error.position(),
                error,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lqd_syntax::MalformedKind;

    const TEMPLATE: &str = "<h1>{{ title }}</h1>\n<p>{{ price | 2x }}</p>\n";

    fn render(diagnostic: &Diagnostic, source: &str) -> String {
        diagnostic.render(source, Utf8Path::new("templates/page.liquid"), &Renderer::plain())
    }

    #[test]
    fn strict_reports_errors_at_source_offsets() {
        let diagnostics = check_source(TEMPLATE, ErrorMode::Strict);
        assert_eq!(diagnostics.len(), 1);

        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.error.kind(), MalformedKind::LeadingDigit);
        assert_eq!(&TEMPLATE[diagnostic.offset..diagnostic.offset + 2], "2x");
    }

    #[test]
    fn renders_source_line_with_caret() {
        let diagnostics = check_source(TEMPLATE, ErrorMode::Strict);
        let output = render(&diagnostics[0], TEMPLATE);

        assert!(output.contains("error: Malformed expression in output tag"), "{output}");
        assert!(output.contains("templates/page.liquid:2:15"), "{output}");
        assert!(output.contains("<p>{{ price | 2x }}</p>"), "{output}");
        assert!(output.contains("^^"), "{output}");
        assert!(output.contains("identifier cannot start with a digit"), "{output}");
        assert!(!output.contains("\x1b["), "{output}");
    }

    #[test]
    fn warn_downgrades_to_warnings() {
        let diagnostics = check_source(TEMPLATE, ErrorMode::Warn);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(render(&diagnostics[0], TEMPLATE).contains("warning: Malformed expression"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("latin1.html")).unwrap();
        std::fs::write(&path, b"caf\xe9 {{ x }}").unwrap();

        let source = read_source(&path).unwrap();
        assert_eq!(source, "caf\u{fffd} {{ x }}");
        assert!(read_source(&path.with_file_name("missing.html")).is_none());
    }

    #[test]
    fn lax_reports_nothing() {
        assert!(check_source(TEMPLATE, ErrorMode::Lax).is_empty());
    }

    #[test]
    fn clean_source() {
        let source = "{{ user.name | default: 'Guest' }} {{- 'x' | upcase -}}";
        assert!(check_source(source, ErrorMode::Strict).is_empty());
    }
}
