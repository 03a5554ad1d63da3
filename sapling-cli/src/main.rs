//! Sapling CLI
//!
//! Parses an HTML document or fragment and prints the resulting tree.
//!
//! Usage:
//!   sapling <file>                  Print the tree in html5lib test format
//!   sapling <file> --json           Print the tree as JSON
//!   sapling <file> --errors         Also list parse errors
//!   sapling --html '<p>Hi'          Parse a string instead of a file
//!   sapling --html '<td>x' --fragment tr

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser as _, ValueEnum};
use owo_colors::OwoColorize;
use sapling_dom::DomTree;
use sapling_html::{
    CollectingSink, DomSink, FragmentContext, Namespace, ParseIssue, Parser,
    ParserOptions, XmlViolationPolicy,
};

/// Sapling: WHATWG HTML parser
#[allow(clippy::struct_excessive_bools)]
#[derive(clap::Parser, Debug)]
#[command(name = "sapling")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Parse a file
    sapling ./index.html

    # Parse inline HTML and show parse errors
    sapling --html '<p><b>bold<p>moved</b>' --errors

    # Parse a fragment as if inside a <tr>
    sapling --html '<td>cell' --fragment tr

    # Parse a fragment inside an SVG <title>
    sapling --html '<b>x' --fragment svg:title

    # Feed the input 3 bytes at a time
    sapling ./index.html --chunk-size 3
"#)]
struct Cli {
    /// Path to the HTML file to parse
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Parse as a fragment in this context element (`svg:` or `math:` for foreign contexts)
    #[arg(long, value_name = "ELEMENT")]
    fragment: Option<String>,

    /// Print the tree as JSON
    #[arg(short, long)]
    json: bool,

    /// List parse errors after the tree
    #[arg(short, long)]
    errors: bool,

    /// Also report warnings (legacy doctypes, quirks mode)
    #[arg(short, long)]
    warnings: bool,

    /// Feed the input in chunks of this many bytes
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Parse as if scripting were disabled
    #[arg(long)]
    no_scripting: bool,

    /// What to do with input an XML infoset cannot carry
    #[arg(long, value_enum, default_value_t = XmlPolicy::Allow)]
    xml: XmlPolicy,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum XmlPolicy {
    Allow,
    Alter,
    Fatal,
}

impl From<XmlPolicy> for XmlViolationPolicy {
    fn from(policy: XmlPolicy) -> Self {
        match policy {
            XmlPolicy::Allow => Self::Allow,
            XmlPolicy::Alter => Self::AlterInfoset,
            XmlPolicy::Fatal => Self::Fatal,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = load_input(&cli)?;
    let mut options = ParserOptions::new()
        .with_scripting(!cli.no_scripting)
        .with_xml_policy(cli.xml.into());
    if cli.warnings {
        options = options.with_warnings();
    }

    let (tree, issues) = parse(&cli, &input, options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", tree.to_test_format());
    }

    if cli.errors {
        print_issues(&issues);
    }
    Ok(())
}

/// Load the document from the CLI arguments.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        anyhow::bail!("nothing to parse: give a FILE or --html")
    }
}

/// Read `[namespace:]local-name`.
fn fragment_context(context: &str) -> FragmentContext {
    match context.split_once(':') {
        Some(("svg", name)) => FragmentContext::foreign(name, Namespace::Svg),
        Some(("math", name)) => FragmentContext::foreign(name, Namespace::MathMl),
        _ => FragmentContext::html(context),
    }
}

fn parse(cli: &Cli, input: &str, options: ParserOptions) -> Result<(DomTree, Vec<ParseIssue>)> {
    let issues = CollectingSink::new();
    let sink = DomSink::new();
    let parser = match cli.fragment {
        Some(ref context) => Parser::new_fragment(sink, options, &fragment_context(context)),
        None => Parser::new(sink, options),
    };
    let mut parser = parser.with_diagnostics(Box::new(issues.clone()));

    let chunk_size = cli.chunk_size.unwrap_or(input.len()).max(1);
    for chunk in chunks(input, chunk_size) {
        parser.feed_all(chunk)?;
    }
    let sink = parser.finish()?;
    if let Some(charset) = sink.declared_charset() {
        log::info!("document declares charset {charset}");
    }
    let tree = if cli.fragment.is_some() {
        sink.into_fragment()
    } else {
        sink.into_tree()
    };
    Ok((tree, issues.take()))
}

/// Split `input` into pieces of about `size` bytes, cut at char boundaries.
fn chunks(input: &str, size: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    while start < input.len() {
        let mut end = (start + size).min(input.len());
        while !input.is_char_boundary(end) {
            end += 1;
        }
        pieces.push(&input[start..end]);
        start = end;
    }
    pieces
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        eprintln!("{}", "no parse errors".green());
        return;
    }
    eprintln!();
    for issue in issues {
        if issue.is_error {
            eprintln!("{} {}", "error:".red().bold(), issue);
        } else {
            eprintln!("{} {}", "warning:".yellow().bold(), issue);
        }
    }
    let errors = issues.iter().filter(|issue| issue.is_error).count();
    eprintln!(
        "{}",
        format!("{errors} errors, {} warnings", issues.len() - errors).dimmed()
    );
}
