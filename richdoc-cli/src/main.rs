// Command-line interface for richdoc
//
// This binary converts stored editor content between the JSON document tree, Markdown, CommonMark
// and HTML, and produces the `{"html": ...}` preview body the editor's preview endpoint returns.
// The core capabilities live in the richdoc-babel crate; this crate only deals with files, flags
// and exit codes.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension, while
// being overwrittable by an explicit --from flag. When neither applies, the input is loaded the way
// stored content is: JSON when it parses as a document tree, Markdown otherwise.
// Usage:
//  richdoc <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  richdoc convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  richdoc preview <input> [--mode tree|regex]  - Print the preview response as JSON
//  richdoc --list-formats                        - List available formats
//
// An input of `-` reads from stdin.
//
// Extra Parameters:
//
// Render parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  richdoc notes.json --to markdown --extra-bullet-marker '*' --extra-mark-order italic,bold

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::debug;
use richdoc_babel::{load_document, preview, FormatRegistry, PreviewMode, RenderOptions};
use richdoc_config::{Loader, RichdocConfig};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
///
/// A lone `-` after the key is a value (`--extra-bullet-marker -`), not stdin.
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| next == "-" || !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("richdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert and preview rich-text editor documents")
        .long_about(
            "richdoc converts the rich-text editor's JSON document tree to and from\n\
            Markdown, CommonMark and HTML, and renders preview HTML.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (default)\n  \
            - preview: Print the {\"html\": ...} preview response for stored content\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass render options:\n  \
            mark-order, bullet-marker, hard-break.\n\n\
            Examples:\n  \
            richdoc post.json --to markdown          # Convert to markdown (stdout)\n  \
            richdoc post.md --to html -o post.html   # Convert to an HTML file\n  \
            richdoc preview post.md                  # Preview response as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a richdoc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - json:       Editor document tree (.json)\n  \
                    - markdown:   Markdown (.md, .markdown)\n  \
                    - commonmark: Strict CommonMark (.cmark)\n  \
                    - html:       HTML fragment (.html, .htm)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Render stored content as a preview response")
                .long_about(
                    "Print {\"html\": \"...\"} for a JSON document tree or raw Markdown.\n\n\
                    On failure {\"error\": \"...\"} is printed instead and the exit\n\
                    status is non-zero.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help("How raw Markdown is previewed (defaults to the configured mode)")
                        .value_parser(["tree", "regex"]),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "preview"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
            handle_convert_command(sub_matches, &extra_params, &config);
        }
        Some(("preview", sub_matches)) => {
            handle_preview_command(&matches, sub_matches, &extra_params);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    sub_matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &RichdocConfig,
) {
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = sub_matches.get_one::<String>("to").expect("to is required");
    let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());

    let options = RenderOptions::from(&config.render);
    let registry = FormatRegistry::with_render_options(&options);

    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let from = sub_matches
        .get_one::<String>("from")
        .cloned()
        .or_else(|| registry.detect_format_from_filename(input));

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    });

    let doc = match from {
        Some(from) => registry.parse(&source, &from).unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        }),
        None => {
            debug!("no source format for '{input}', detecting from content");
            load_document(&source)
        }
    };

    let text = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the preview command
///
/// Every failure, configuration included, is reported as `{"error": ...}` on
/// stdout so callers only ever parse one shape.
fn handle_preview_command(
    matches: &ArgMatches,
    sub_matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
) {
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");

    let config = build_config(matches.get_one::<String>("config").map(|s| s.as_str()))
        .unwrap_or_else(|err| preview_error(&format!("Failed to load configuration: {err}")));

    let mut options = RenderOptions::from(&config.render);
    if let Err(err) = options.apply_params(extra_params) {
        preview_error(&err.to_string());
    }

    let mode = sub_matches
        .get_one::<String>("mode")
        .and_then(|name| PreviewMode::from_name(name))
        .unwrap_or(config.preview.markdown_mode);

    let source = read_input(input)
        .unwrap_or_else(|e| preview_error(&format!("Error reading '{input}': {e}")));

    let response = preview(&source, &options, mode);
    match serde_json::to_string(&response) {
        Ok(json) => println!("{json}"),
        Err(err) => preview_error(&err.to_string()),
    }
}

fn preview_error(message: &str) -> ! {
    println!("{}", serde_json::json!({ "error": message }));
    std::process::exit(1);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let extensions = format.file_extensions().join(", ");
            println!(
                "  {format_name:<12} {} [{extensions}]",
                format.description()
            );
        }
    }
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

fn build_config(explicit_path: Option<&str>) -> Result<RichdocConfig, richdoc_config::Error> {
    let loader = Loader::new().with_optional_file("richdoc.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build()
}

fn load_cli_config(explicit_path: Option<&str>) -> RichdocConfig {
    build_config(explicit_path).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
