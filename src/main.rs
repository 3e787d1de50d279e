use bfvm::{CellKind, Options, evaluate, evaluate_file, repl};
use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::Path;

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage: {0} [OPTION]... <source-file>

Options:
  -e, --evaluate=<program>  evaluate a one line program
  -i, --ignore-unknowns     ignore unknown commands within the program
  -s, --use-signed-cells    use a signed type for each cell
  -r, --repl                start an interactive session
  -h, --help                print this message

Notes:
- Input (`,`) reads a single byte from stdin; at end of input the current
  cell is left unchanged.
- Without -i, any byte outside of ><+-.,[] (and space/newline) is an error.

Examples:
- Run a program from a file:
    {0} ./program.bf
- Run an inline program:
    {0} -e "++>+++<[->+<]>."
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfvm", disable_help_flag = true)]
struct Cli {
    /// Evaluate a one line program given inline
    #[arg(
        short = 'e',
        long = "evaluate",
        value_name = "program",
        allow_hyphen_values = true
    )]
    evaluate: Option<String>,

    /// Ignore unknown commands within the program
    #[arg(short = 'i', long = "ignore-unknowns")]
    ignore_unknowns: bool,

    /// Use a signed type for each cell
    #[arg(short = 's', long = "use-signed-cells")]
    use_signed: bool,

    /// Start an interactive session
    #[arg(short = 'r', long = "repl")]
    repl: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    /// Source file path
    #[arg(value_name = "source-file")]
    source: Option<String>,
}

fn run_repl(program: &str, options: Options) -> i32 {
    // Flush and leave cleanly on ctrl+c instead of dying mid-line.
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    println!("Brainfuck session. One program per line; EOF or ctrl+c exits.");

    match repl::repl_loop(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| String::from("bfvm"));

    let cli = Cli::parse();

    if cli.help {
        usage_and_exit(&program, 0);
    }

    let options = Options {
        ignore_unknowns: cli.ignore_unknowns,
        cells: if cli.use_signed {
            CellKind::I32
        } else {
            CellKind::U32
        },
    };

    if cli.repl {
        std::process::exit(run_repl(&program, options));
    }

    let status = match (cli.evaluate, cli.source) {
        (Some(inline), None) => evaluate(&inline, options),
        (None, Some(path)) => evaluate_file(Path::new(&path), options),
        // Nothing to run, or an inline program alongside a file path.
        _ => usage_and_exit(&program, 2),
    };

    std::process::exit(status.code());
}
