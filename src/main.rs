//! CLI tool to inspect and check template token streams.

use std::fs;
use std::process::ExitCode;

use template_lexer::{LexConfig, dump, lex};

fn usage() {
    eprintln!("Usage: tmplex <command> [options] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens  Print every token as `line:position kind value`");
    eprintln!("  render  Print the display form of the token stream");
    eprintln!("  check   Check that template(s) lex without error");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --left-delim <s>   Opening action delimiter (default {{{{)");
    eprintln!("  --right-delim <s>  Closing action delimiter (default }}}})");
    eprintln!("  --comments         Emit comment tokens");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  tmplex tokens page.tmpl");
    eprintln!("  tmplex check --left-delim '<%' --right-delim '%>' *.tmpl");
    eprintln!();
    eprintln!("Set RUST_LOG=template_lexer=trace to trace the lexer.");
}

/// Install a subscriber only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

struct Options {
    left_delim: String,
    right_delim: String,
    emit_comment: bool,
    files: Vec<String>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        left_delim: String::new(),
        right_delim: String::new(),
        emit_comment: false,
        files: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--left-delim" => {
                options.left_delim = iter
                    .next()
                    .ok_or("--left-delim needs a value")?
                    .clone();
            }
            "--right-delim" => {
                options.right_delim = iter
                    .next()
                    .ok_or("--right-delim needs a value")?
                    .clone();
            }
            "--comments" => options.emit_comment = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option: {flag}"));
            }
            _ => options.files.push(arg.clone()),
        }
    }

    Ok(options)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        usage();
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    if !matches!(command, "tokens" | "render" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    let options = match parse_options(&args[2..]) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if options.files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in &options.files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let config = LexConfig::new(path, &content)
            .delims(&options.left_delim, &options.right_delim)
            .emit_comments(options.emit_comment);
        let lexed = lex(config);

        match command {
            "tokens" => print!("{}", dump(&lexed.tokens)),
            "render" => println!("{lexed}"),
            _ => {}
        }

        match lexed.error() {
            Some(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
            None if command == "check" => {
                eprintln!("{path}: valid ({} token(s))", lexed.tokens.len());
            }
            None => {}
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
