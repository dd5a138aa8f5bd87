use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use webjump::{Context, DOCUMENTATION_URL, JsonFileStore, Outcome, find_with};

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let store = match &config.store_path {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default(),
    };
    let mut ctx = Context::new(Box::new(store));

    let outcome = find_with(&config.request, &mut ctx, |url| {
        if config.open {
            if let Err(err) = open_destination(url) {
                eprintln!("error: could not open {url}: {err}");
                std::process::exit(1);
            }
        } else {
            println!("{url}");
        }
    });

    match outcome {
        Outcome::Url(url) if url.is_empty() => {
            eprintln!("error: request resolved to an empty destination");
            std::process::exit(1);
        }
        Outcome::Url(_) => {}
        Outcome::Command(message) => {
            if let Some(message) = message {
                println!("{message}");
            }
        }
        Outcome::NoRequest => {
            eprintln!("error: no request provided\n\n{}", help_text());
            std::process::exit(2);
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

struct CliConfig {
    request: String,
    store_path: Option<PathBuf>,
    open: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut request: Option<String> = None;
    let mut store_path: Option<PathBuf> = None;
    let mut open = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("webjump {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--open" | "-o" => open = true,
            "--store" => {
                let value = args.next().ok_or_else(|| "error: --store expects a path".to_string())?;
                store_path = Some(PathBuf::from(value));
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if request.is_some() {
                        return Err("error: request provided multiple times".to_string());
                    }
                    request = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--store=") => {
                let value = arg.trim_start_matches("--store=");
                store_path = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if request.is_some() {
                    return Err("error: request provided multiple times".to_string());
                }
                request = Some(rest);
                break;
            }
        }
    }

    let request = match request {
        Some(value) => value,
        None => read_stdin_request()?,
    };

    if request.trim().is_empty() {
        return Err(format!("error: no request provided\n\n{}", help_text()));
    }

    Ok(CliConfig { request, store_path, open })
}

fn read_stdin_request() -> Result<String, String> {
    if io::stdin().is_terminal() {
        return Err(format!("error: no request provided\n\n{}", help_text()));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end().to_string())
}

// `find_with` hands us a protocol-ready URL already.
fn open_destination(url: &str) -> io::Result<()> {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    run_opener(program, url)
}

fn run_opener(program: &str, url: &str) -> io::Result<()> {
    let status = std::process::Command::new(program).arg(url).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

fn help_text() -> String {
    format!(
        "webjump {version}

Symbol-prefixed query router: one input, many destinations.

Usage:
  webjump [OPTIONS] [--] <request...>
  echo '<request>' | webjump [OPTIONS]

Requests:
  !<id> <query>    search engines   (!g rust, !m brazil, !gh serde)
  +<id> <query>    do / create      (+doc notes, +wr)
  &<id> <query>    build / project  (&gh rust-lang/rust)
  #<id> <args>     commands         (#add ! ex https://example.org/?q={{}}, #help)

A request with no known leading symbol is routed to the default search
engine as-is.

Options:
  -o, --open             Open the destination with the system opener instead
                         of printing it.
  --store <path>         Path of the user engine table (JSON). Default:
                         <config-dir>/webjump/symbols.json
  -h, --help             Show this help message.
  -V, --version          Print version information.

Exit codes:
  0  Routed (URL printed/opened, or command ran).
  1  Internal error.
  2  Invalid arguments or missing request.

Documentation: {documentation}
",
        version = env!("CARGO_PKG_VERSION"),
        documentation = DOCUMENTATION_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_text_points_at_the_documentation() {
        assert!(help_text().contains(DOCUMENTATION_URL));
    }

    #[cfg(unix)]
    #[test]
    fn opener_exit_status_is_checked() {
        assert!(run_opener("true", "https://example.org").is_ok());
        assert!(run_opener("false", "https://example.org").is_err());
    }
}
