//! A line-based interactive session.
//!
//! Each submitted line is filtered down to command characters and run
//! against a fresh tape; errors are reported in the standard format and the
//! session continues. EOF ends the session.

use std::env;
use std::io::{self, BufRead, Write};

use crate::eval::{Options, evaluate};

pub fn repl_loop(options: Options) -> io::Result<()> {
    let stdin = io::stdin();

    loop {
        print!("bf> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF ends the session; start the shell prompt on a fresh line.
            println!();
            io::stdout().flush()?;
            return Ok(());
        }

        let program = command_chars(&line);
        if program.is_empty() {
            continue;
        }

        evaluate(&program, options);
        println!();
        io::stdout().flush()?;

        // Test hook: exit after a single execution.
        if env::var("BF_REPL_ONCE").ok().as_deref() == Some("1") {
            return Ok(());
        }
    }
}

/// Keep only command characters.
fn command_chars(line: &str) -> String {
    line.chars()
        .filter(|c| matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']'))
        .collect()
}
