//! HAL CURIE CLI
//!
//! Command-line tool for shortening link-relation types of HAL+JSON
//! documents with CURIEs and for inspecting their relation structure.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use hal_curies::{
    decode, decode_with, parse_document, to_json_string, CuriTemplate, EncodeOptions, HalError,
    Link, RelRegistry, Resource, CURIES_REL, HAL_MEDIA_TYPE, LINKS,
};

#[derive(Parser)]
#[command(name = "hal-curies")]
#[command(about = "Apply CURIEs to HAL+JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten link-relation types of a document using CURIEs
    Curie(CurieArgs),
    /// Print the link-relation types of a document and its embedded resources
    Rels(RelsArgs),
}

#[derive(Args)]
struct CurieArgs {
    /// Path to a HAL+JSON file, `-` for stdin, or URL
    source: String,

    /// CURIE to declare on the root resource: --curie <PREFIX>=<TEMPLATE>
    /// Can be repeated; the template must contain {rel}
    #[arg(long = "curie", value_name = "PREFIX=TEMPLATE")]
    curies: Vec<String>,

    /// Link-relation types always rendered as arrays
    #[arg(long = "array-rel", value_name = "REL")]
    array_rels: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Render embedded resources as arrays even if a rel holds a single one
    #[arg(long)]
    embedded_as_array: bool,
}

#[derive(Args)]
struct RelsArgs {
    /// Path to a HAL+JSON file, `-` for stdin, or URL
    source: String,
}

/// Check if a source string is a URL
fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse a `PREFIX=TEMPLATE` argument
fn parse_curie_arg(arg: &str) -> Result<CuriTemplate, HalError> {
    let (prefix, template) = arg.split_once('=').ok_or_else(|| {
        HalError::InvalidArgument(format!("expected PREFIX=TEMPLATE, got '{}'", arg))
    })?;
    CuriTemplate::new(prefix.trim(), template.trim())
}

/// Remove CURIE declarations of the given prefixes from a document's root links
///
/// Returns the number of declarations removed.
fn drop_declared_curies(document: &mut Value, prefixes: &[&str]) -> usize {
    let Some(links) = document.get_mut(LINKS).and_then(Value::as_object_mut) else {
        return 0;
    };
    let is_replaced = |curie: &Value| {
        curie
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| prefixes.contains(&name))
    };

    let removed = match links.get_mut(CURIES_REL) {
        Some(Value::Array(curies)) => {
            let before = curies.len();
            curies.retain(|curie| !is_replaced(curie));
            before - curies.len()
        }
        Some(curie) => usize::from(is_replaced(curie)),
        None => 0,
    };
    let drop_rel = match links.get(CURIES_REL) {
        Some(Value::Array(curies)) => curies.is_empty(),
        Some(curie) => is_replaced(curie),
        None => false,
    };
    if drop_rel {
        links.shift_remove(CURIES_REL);
    }
    removed
}

/// Fetch a document over HTTP
fn fetch_url(url: &str) -> Result<String, HalError> {
    reqwest::blocking::Client::new()
        .get(url)
        .header(reqwest::header::ACCEPT, HAL_MEDIA_TYPE)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| HalError::LoadError {
            path: url.to_string(),
            reason: format!("HTTP request failed: {}", e),
        })?
        .text()
        .map_err(|e| HalError::LoadError {
            path: url.to_string(),
            reason: format!("Failed to read response: {}", e),
        })
}

/// Load a document from a URL, stdin or a local path
fn load_document(source: &str) -> Result<Value, HalError> {
    let content = if is_url(source) {
        info!("Loading from URL: {}", source);
        fetch_url(source)?
    } else if source == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        fs::read_to_string(source).map_err(|e| HalError::LoadError {
            path: source.to_string(),
            reason: e.to_string(),
        })?
    };

    parse_document(&content, source)
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), HalError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            info!("Wrote document to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_curie(args: CurieArgs) -> Result<(), HalError> {
    let templates = args
        .curies
        .iter()
        .map(|arg| parse_curie_arg(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let registry = RelRegistry::new(templates).with_array_rels(args.array_rels);

    let mut document = load_document(&args.source)?;
    let prefixes: Vec<&str> = registry.curies().iter().map(CuriTemplate::prefix).collect();
    let replaced = drop_declared_curies(&mut document, &prefixes);
    if replaced > 0 {
        info!("Replacing {} CURIE declarations of the document", replaced);
    }
    let declarations = registry
        .curies()
        .iter()
        .map(|curie| Link::curi(curie.prefix(), curie.template()))
        .collect::<Result<Vec<_>, _>>()?;
    let resource = decode_with(&document, &registry)?.with_links(declarations);

    info!(
        "Applied {} CURIEs, root has {} link rels and {} embedded rels",
        resource.registry().curies().len(),
        resource.links().rels().len(),
        resource.embedded().rels().len()
    );

    let options = EncodeOptions {
        pretty: args.pretty,
        embedded_as_array: args.embedded_as_array,
    };
    let output = to_json_string(&resource, &options)?;
    write_output(&output, args.output.as_ref())
}

/// Print the rels of a resource, indented by nesting depth
fn print_rels(resource: &Resource, depth: usize) {
    let indent = "  ".repeat(depth);
    for (rel, links) in resource.links().iter() {
        println!("{}link {} ({})", indent, rel, links.len());
    }
    for (rel, items) in resource.embedded().iter() {
        println!("{}embedded {} ({})", indent, rel, items.len());
        for item in items {
            print_rels(item, depth + 1);
        }
    }
}

fn run_rels(args: RelsArgs) -> Result<(), HalError> {
    let document = load_document(&args.source)?;
    let resource = decode(&document)?;
    print_rels(&resource, 0);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hal_curies=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Curie(args) => run_curie(args),
        Commands::Rels(args) => run_rels(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
