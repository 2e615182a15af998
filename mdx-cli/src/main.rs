// Command-line interface for mdx
//
// This binary converts blog posts between the MDX subset and the editor's document tree,
// and offers a couple of tools to look at what the parser made of a post.
// All conversion work is done by the mdx-babel crate; this is only the shell around it.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  mdx <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  mdx convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  mdx inspect <input> [--from <format>] - Print the document tree
//  mdx check <input>                     - Verify that the post survives an export/import cycle
//  mdx --list-formats                    - List available formats
//
// Extra Parameters:
//
// Settings from the configuration can be overridden with --extra-<parameter-name> <value>.
// Example:
//  mdx post.mdx --to json --extra-compact --extra-image-width-max 960

use clap::{Arg, ArgAction, Command, ValueHint};
use mdx_babel::{round_trip_divergence, FormatRegistry, JsonFormat, MediaOptions, TreevizFormat};
use mdx_config::{Loader, MdxConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "check", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

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

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("mdx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert blog posts between MDX and the editor's document tree")
        .long_about(
            "mdx is a command-line tool for working with blog posts written in the MDX subset\n\
            understood by the editor (headings, lists, code, emphasis, <ImageFigure /> and\n\
            <VideoEmbed /> components).\n\n\
            Commands:\n  \
            - convert: Transform between formats (mdx, json, treeviz)\n  \
            - inspect: Print the parsed document tree\n  \
            - check:   Verify that a post survives an export/import cycle\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override a configuration setting.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdx post.mdx --to json                   # Editor JSON on stdout\n  \
            mdx tree.json --to mdx -o post.mdx       # Back to markup\n  \
            mdx inspect post.mdx --extra-show-marks false",
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
                .help("Path to an mdx.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug events to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - mdx:     MDX subset (.mdx, .md)\n  \
                    - json:    Editor document tree (.json)\n  \
                    - treeviz: Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
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
            Command::new("inspect")
                .about("Print the document tree of a post")
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Verify that a post survives an export/import cycle")
                .long_about(
                    "Parses the post, exports it back to MDX and parses the result again.\n\
                    Prints 'ok' when both trees are equal; otherwise reports the first\n\
                    top-level block that changed and exits with status 1.",
                )
                .arg(input_arg()),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means the default `convert` command.
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
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

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_tracing(&config.logging.level, matches.get_flag("verbose"));

    for key in extra_params.keys() {
        tracing::warn!(parameter = %key, "ignoring unknown --extra parameter");
    }

    let registry = build_registry(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("--to is required");
            };

            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("inspect", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required");
            };
            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"));
            handle_convert_command(&registry, input, &from, "treeviz", None);
        }
        Some(("check", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required");
            };
            handle_check_command(input, &MediaOptions::from(&config.media));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// The explicit --from value, or the format registered for the input's extension.
fn source_format(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> String {
    if let Some(from) = explicit {
        return from.to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    if let Err(e) = registry.get(from) {
        fail(&e.to_string());
    }
    if let Err(e) = registry.get(to) {
        fail(&e.to_string());
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let mut text = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    if !text.ends_with('\n') {
        text.push('\n');
    }

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

/// Handle the check command
fn handle_check_command(input: &str, media: &MediaOptions) {
    let source = read_input(input);
    match round_trip_divergence(&source, media) {
        None => println!("ok"),
        Some(index) => {
            println!("round trip changed top-level block {index}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        let extensions = format
            .file_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {name:<8} {direction:<6} {extensions:<12} {}",
            format.description()
        );
    }
}

fn build_registry(config: &MdxConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_media(MediaOptions::from(&config.media));
    registry.register(JsonFormat {
        pretty: config.convert.json.pretty,
    });
    registry.register(TreevizFormat {
        show_marks: config.inspect.show_marks,
    });
    registry
}

fn load_cli_config(explicit_path: Option<&str>) -> MdxConfig {
    let loader = Loader::new().with_optional_file("mdx.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn apply_config_overrides(config: &mut MdxConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["image-width-min"]) {
        config.media.image_width_min = parse_width_arg("image-width-min", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["image-width-max"]) {
        config.media.image_width_max = parse_width_arg("image-width-max", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["aspect-ratio", "default-aspect-ratio"]) {
        config.media.default_aspect_ratio = match raw.parse::<f64>() {
            Ok(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            _ => {
                eprintln!("Invalid aspect ratio '{raw}' for --extra-aspect-ratio");
                std::process::exit(1);
            }
        };
    }
    if let Some(raw) = extra_params.remove("compact") {
        config.convert.json.pretty = !parse_bool_arg("compact", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["show-marks", "marks"]) {
        config.inspect.show_marks = parse_bool_arg("show-marks", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_width_arg(flag: &str, raw: &str) -> u32 {
    raw.parse::<u32>().unwrap_or_else(|_| {
        eprintln!("Invalid width '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
