use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use lsp_types::{CodeAction, OptionalVersionedTextDocumentIdentifier, Uri};
use tern_config::TernConfig;
use tern_core::LineIndex;
use tern_refactor::{code_actions, CodeActionsRequest};
use tern_syntax::GoParse;
use tern_types::TypeInfo;

mod selection;

use selection::Selection;

#[derive(Parser)]
#[command(name = "tern", version, about = "Tern CLI (Go code actions)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the code actions available at a selection
    CodeActions(CodeActionsArgs),
    /// Apply the first code action available at a selection
    Rewrite(RewriteArgs),
    /// Print a debug parse tree / errors for a single file
    Parse(ParseArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("selection").required(true).args(["range", "line"])))]
struct SelectionArgs {
    /// Byte range `<start>..<end>`
    #[arg(long, value_parser = selection::parse_range)]
    range: Option<Selection>,
    /// 1-based line, optionally with a 1-based byte column: `<L>[:<C>]`
    #[arg(long, value_parser = selection::parse_line)]
    line: Option<Selection>,
}

impl SelectionArgs {
    fn selection(&self) -> Selection {
        match (self.range, self.line) {
            (Some(range), _) => range,
            (None, Some(line)) => line,
            (None, None) => unreachable!("clap requires one argument of the `selection` group"),
        }
    }
}

#[derive(Args)]
struct CodeActionsArgs {
    /// Go source file
    file: PathBuf,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Print the LSP code actions as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RewriteArgs {
    /// Go source file
    file: PathBuf,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Write the result back to the file instead of printing it
    #[arg(long)]
    in_place: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// File to parse
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(target: "tern.cli", error = ?err, "command failed");
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::CodeActions(args) => {
            let file = SourceFile::load(&args.file)?;
            let actions = file.code_actions(args.selection.selection())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
            } else {
                for action in &actions {
                    match &action.kind {
                        Some(kind) => println!("{} ({})", action.title, kind.as_str()),
                        None => println!("{}", action.title),
                    }
                }
            }
            Ok(0)
        }
        Command::Rewrite(args) => {
            let file = SourceFile::load(&args.file)?;
            let actions = file.code_actions(args.selection.selection())?;
            let Some(action) = actions.first() else {
                eprintln!("no code action available at the selection");
                return Ok(1);
            };
            let rewritten = file.apply(action)?;
            if args.in_place {
                write_atomically(&args.file, &rewritten)?;
                tracing::info!(
                    target: "tern.cli",
                    path = %args.file.display(),
                    title = %action.title,
                    "rewrote file"
                );
            } else {
                print!("{rewritten}");
            }
            Ok(0)
        }
        Command::Parse(args) => {
            let file = SourceFile::load(&args.file)?;
            print!("{:#?}", file.parse.syntax());
            let index = LineIndex::new(&file.text);
            for error in &file.parse.errors {
                let pos = index.line_col(error.range.start());
                println!("error:{}:{}: {}", pos.line + 1, pos.col + 1, error.message);
            }
            Ok(if file.parse.errors.is_empty() { 0 } else { 1 })
        }
    }
}

/// A Go file read from disk, parsed and type-checked, with the configuration that applies
/// to it.
struct SourceFile {
    uri: Uri,
    text: String,
    parse: GoParse,
    info: TypeInfo,
    config: TernConfig,
}

impl SourceFile {
    fn load(path: &Path) -> Result<SourceFile> {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let (config, config_path) = tern_config::load_for_workspace(dir)
            .with_context(|| format!("failed to load configuration for {}", dir.display()))?;
        tern_config::init_tracing(&config.logging);
        if let Some(config_path) = &config_path {
            tracing::debug!(target: "tern.cli", path = %config_path.display(), "using config");
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let url = url::Url::from_file_path(&path)
            .map_err(|()| anyhow::anyhow!("cannot build a file URI for {}", path.display()))?;
        let uri = Uri::from_str(url.as_str())
            .map_err(|err| anyhow::anyhow!("invalid file URI {url}: {err}"))?;

        let parse = tern_syntax::parse_go(&text);
        if !parse.errors.is_empty() {
            tracing::warn!(
                target: "tern.cli",
                path = %path.display(),
                errors = parse.errors.len(),
                "file has syntax errors"
            );
        }
        let info = tern_types::check_file(&parse);

        Ok(SourceFile {
            uri,
            text,
            parse,
            info,
            config,
        })
    }

    fn code_actions(&self, selection: Selection) -> Result<Vec<CodeAction>> {
        let index = LineIndex::new(&self.text);
        let range = selection.resolve(&self.text, &index)?;
        let document = OptionalVersionedTextDocumentIdentifier {
            uri: self.uri.clone(),
            version: None,
        };
        let request = CodeActionsRequest::new(document, &self.text, &self.parse, &self.info, range)
            .with_config(self.config.code_actions);
        code_actions(&request).context("failed to compute code actions")
    }

    fn apply(&self, action: &CodeAction) -> Result<String> {
        let edit = action
            .edit
            .as_ref()
            .with_context(|| format!("code action `{}` has no edit", action.title))?;
        tern_refactor::lsp::apply_workspace_edit(&self.text, &self.uri, edit)
            .with_context(|| format!("failed to apply `{}`", action.title))
    }
}

fn write_atomically(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())?;
    // The temporary file is created private; the rewritten file keeps the original mode.
    let permissions = std::fs::metadata(path)
        .with_context(|| format!("failed to read metadata of {}", path.display()))?
        .permissions();
    tmp.as_file().set_permissions(permissions)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
