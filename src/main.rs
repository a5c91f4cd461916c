//! minish: interactive shell.
//!
//! `minish -c LINE` evaluates one line; without `-c` a read-eval loop runs
//! on standard input until `exit` or end of input.

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use log::{error, info};

use minish::config::Config;
use minish::{Shell, ShellError, logging};

#[derive(Parser, Debug)]
#[command(name = "minish", version, about = "A small shell with built-in applications")]
struct Args {
    /// Evaluate LINE and exit instead of starting the interactive loop.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    command: Option<String>,

    /// Log level (off, error, warn, info, debug, trace); overrides the config.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the merged configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    let args = Args::parse();
    let config = Config::load();

    if args.dump_config {
        match config.to_toml() {
            Ok(toml) => print!("{toml}"),
            Err(e) => {
                eprintln!("minish: cannot render config: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(logging::parse_level(level));

    let mut shell = Shell::new(&config);
    let code = match args.command {
        Some(line) => run_once(&mut shell, &line),
        None => repl(&mut shell, &config),
    };
    process::exit(code);
}

fn run_once(shell: &mut Shell, line: &str) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = shell.eval(line, &mut stdin.lock(), &mut out);
    let _ = out.flush();
    match result {
        Ok(()) => 0,
        Err(ShellError::Exit(code)) => code,
        Err(e) => {
            error!("{line:?}: {e}");
            eprintln!("shell: {e}");
            1
        }
    }
}

fn repl(shell: &mut Shell, config: &Config) -> i32 {
    info!("interactive session started in {}", shell.env().cwd().display());
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{}", config.prompt_for(shell.env().cwd()));
        let _ = io::stdout().flush();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => return 0,
            Ok(_) => {}
            Err(e) => {
                eprintln!("shell: {e}");
                return 1;
            }
        }
        let line = input.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        // Applications read stdin only when nothing is redirected into them,
        // so an interactive `cat` consumes the rest of the session's input.
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = shell.eval(line, &mut stdin.lock(), &mut out);
        let _ = out.flush();
        match result {
            Ok(()) => {}
            Err(ShellError::Exit(code)) => return code,
            Err(e) => {
                error!("{line:?}: {e}");
                eprintln!("shell: {e}");
            }
        }
    }
}
