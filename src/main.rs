use std::{
    fs,
    io::{self, IsTerminal, Read},
    process::ExitCode,
};

use clap::Parser;
use reckon::{
    error::Fault,
    interpreter::{
        input::{CharSource, LineEditorSource, ScriptSource},
        lexer::TokenStream,
        session::{Session, PROMPT},
    },
};

/// reckon is an interactive arithmetic expression evaluator with named,
/// mutable variables and a small set of session commands.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells reckon to evaluate a file instead of inline statements.
    #[arg(short, long)]
    file: bool,

    /// Statements to evaluate. Omit to read from standard input.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let outcome = if let Some(contents) = args.contents {
        let script = if args.file {
            fs::read_to_string(&contents).unwrap_or_else(|_| {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &contents);
                std::process::exit(1);
            })
        } else {
            contents
        };
        run_session(Box::new(ScriptSource::new(&script)), false)
    } else if io::stdin().is_terminal() {
        match LineEditorSource::new(PROMPT) {
            Ok(editor) => run_session(Box::new(editor), true),
            Err(error) => {
                eprintln!("Failed to start the interactive editor: {error}");
                return ExitCode::from(1);
            },
        }
    } else {
        let mut piped = String::new();
        if io::stdin().read_to_string(&mut piped).is_err() {
            eprintln!("Failed to read from standard input.");
            return ExitCode::from(1);
        }
        run_session(Box::new(ScriptSource::new(&piped)), false)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(fault) => {
            eprintln!("{fault}");
            ExitCode::from(2)
        },
    }
}

fn run_session(source: Box<dyn CharSource>, interactive: bool) -> Result<(), Fault> {
    let mut session = Session::new(TokenStream::new(source), io::stdout(), io::stderr());
    if interactive {
        session = session.interactive();
    }
    session.run()
}
