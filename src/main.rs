// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use yaml_lens::config;
use yaml_lens::i18n::{self, LocaleStore, StaticRequest, TranslateOptions, Translator};
use yaml_lens::paths;
use yaml_lens::FormatArg;

const HELP: &str = "\
yaml_lens - translate a key against a tree of YAML locale files

USAGE:
  yaml_lens [OPTIONS] KEY

OPTIONS:
  --locales DIR         Locale root (default: from settings.toml, then ./locales)
  --lang CODE           Language to translate into
  --failback CODE       Language tried when CODE has no table
  --ignore-case         Match keys case-insensitively
  --config-dir DIR      Directory holding settings.toml
  --scope S             Request scope for relative keys
  --endpoint E          Request endpoint for `..key` lookups
  --arg VALUE           Positional argument (repeatable)
  --named NAME=VALUE    Named argument (repeatable)
  -h, --help            Print this help
";

struct Flags {
    locales: Option<PathBuf>,
    lang: Option<String>,
    failback: Option<String>,
    ignore_case: bool,
    config_dir: Option<String>,
    scope: Option<String>,
    endpoint: Option<String>,
    args: Vec<String>,
    named: Vec<String>,
    key: String,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        locales: args.opt_value_from_str("--locales")?,
        lang: args.opt_value_from_str("--lang")?,
        failback: args.opt_value_from_str("--failback")?,
        ignore_case: args.contains("--ignore-case"),
        config_dir: args.opt_value_from_str("--config-dir")?,
        scope: args.opt_value_from_str("--scope")?,
        endpoint: args.opt_value_from_str("--endpoint")?,
        args: args.values_from_str("--arg")?,
        named: args.values_from_str("--named")?,
        key: args.free_from_str()?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unused arguments");
    }
    Ok(Some(flags))
}

fn run(flags: Flags) -> yaml_lens::Result<String> {
    paths::init_cli_override(flags.config_dir);
    let (config, warning) = config::load();
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }

    let root = match flags.locales {
        Some(dir) => dir,
        None => config.locale_root(&std::env::current_dir()?),
    };
    let mut options = config.locales.store_options();
    options.ignore_case |= flags.ignore_case;

    let store = LocaleStore::open(root, options)?;
    let language = i18n::resolve_language(flags.lang.as_deref(), &config);
    let translator = Translator::new(Arc::new(store)).with_default_language(language);

    let mut call = TranslateOptions::new().failback(
        flags
            .failback
            .unwrap_or_else(|| config.failback().to_string()),
    );
    for raw in &flags.args {
        call = call.arg(FormatArg::parse_lossy(raw));
    }
    for pair in &flags.named {
        match pair.split_once('=') {
            Some((name, value)) => call = call.named(name, FormatArg::parse_lossy(value)),
            None => tracing::warn!(%pair, "ignoring --named without '='"),
        }
    }

    let mut request = StaticRequest::new();
    if let Some(scope) = flags.scope {
        request = request.scope(scope);
    }
    if let Some(endpoint) = flags.endpoint {
        request = request.endpoint(endpoint);
    }

    let text = translator.t_with(&flags.key, &call, &request)?;
    Ok(text.into_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
