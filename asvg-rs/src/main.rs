mod error;

use asvg_graph::{svg, Picture, PictureOptions};
use asvg_script::Interpreter;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read, Write}, process::ExitCode};

pub const USAGE: &str = "usage: asvg [FILE] [-o OUT] [--width W] [--height H]

Runs the drawing script in FILE, or read from stdin, and writes the SVG document to OUT, or to
stdout. Without a script, starts an interactive prompt.";

/// The parsed command line.
#[derive(Debug, Default)]
struct Args {
    /// The script to run.
    input: Option<String>,

    /// Where to write the document.
    output: Option<String>,

    width: Option<f64>,
    height: Option<f64>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Args, Error> {
        let mut parsed = Args::default();

        fn size(flag: &str, value: Option<String>) -> Result<f64, Error> {
            let value = value.ok_or_else(|| Error::Usage(format!("`{}` needs a value", flag)))?;
            match value.parse::<f64>() {
                Ok(size) if size > 0.0 && size.is_finite() => Ok(size),
                _ => Err(Error::Usage(format!("`{}` must be a positive number, found `{}`", flag, value))),
            }
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    let out = args.next().ok_or_else(|| Error::Usage(format!("`{}` needs a file name", arg)))?;
                    parsed.output = Some(out);
                },
                "--width" => parsed.width = Some(size(&arg, args.next())?),
                "--height" => parsed.height = Some(size(&arg, args.next())?),
                "-h" | "--help" => return Err(Error::Usage("asvg: draw pictures from scripts".to_string())),
                flag if flag.starts_with('-') && flag != "-" => {
                    return Err(Error::Usage(format!("unknown option `{}`", flag)));
                },
                _ if parsed.input.is_some() => {
                    return Err(Error::Usage(format!("unexpected argument `{}`", arg)));
                },
                _ => parsed.input = Some(arg),
            }
        }

        Ok(parsed)
    }

    /// The options of the pictures drawn, with the canvas size from the command line.
    fn picture_options(&self) -> PictureOptions {
        let defaults = PictureOptions::default();
        let width = self.width.unwrap_or(defaults.width);
        let height = self.height.unwrap_or(defaults.height);
        defaults.canvas_size(width, height)
    }
}

/// Runs the script and writes the picture it draws.
fn execute(input: &str, args: &Args) -> Result<(), Error> {
    let mut picture = Picture::new(args.picture_options())?;
    Interpreter::new().run(input, &mut picture)?;

    match &args.output {
        Some(path) => svg::save(&picture, path)?,
        None => {
            let mut stdout = io::stdout().lock();
            svg::write(&picture, &mut stdout)?;
            writeln!(stdout)?;
        },
    }
    Ok(())
}

/// An interactive session: every line runs against the same picture.
struct Repl {
    options: PictureOptions,
    interpreter: Interpreter,
    picture: Picture,
}

impl Repl {
    fn new(options: PictureOptions) -> Result<Repl, Error> {
        Ok(Repl {
            picture: Picture::new(options.clone())?,
            options,
            interpreter: Interpreter::new(),
        })
    }

    /// Runs a line of input: either a `.` command of the prompt or script statements.
    fn execute(&mut self, input: &str) -> Result<(), Error> {
        let input = input.trim();
        if input == ".svg" {
            let mut stdout = io::stdout().lock();
            svg::write(&self.picture, &mut stdout)?;
            writeln!(stdout)?;
        } else if let Some(path) = input.strip_prefix(".save") {
            let path = path.trim();
            if path.is_empty() {
                return Err(Error::Usage("`.save` needs a file name".to_string()));
            }
            svg::save(&self.picture, path)?;
        } else if input == ".clear" {
            *self = Repl::new(self.options.clone())?;
        } else {
            self.interpreter.resume(input, &mut self.picture)?;
        }
        Ok(())
    }
}

fn run_repl(args: &Args) -> Result<(), Error> {
    let mut rl = DefaultEditor::new().map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    let mut repl = Repl::new(args.picture_options())?;

    fn process_line(rl: &mut DefaultEditor, repl: &mut Repl) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        if let Err(err) = repl.execute(&input) {
            err.report_to_stderr(&input);
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut repl) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            err.report_to_stderr("");
            return ExitCode::from(2);
        },
    };

    let input = match args.input.as_deref() {
        // run source file
        Some(path) if path != "-" => fs::read_to_string(path).map(Some),

        // read source from stdin
        _ if args.input.is_some() || !io::stdin().is_terminal() => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).map(|_| Some(input))
        },

        // run the repl / interactive mode
        _ => Ok(None),
    };

    let result = match input {
        Ok(Some(input)) => execute(&input, &args).map_err(|err| (err, input)),
        Ok(None) => run_repl(&args).map_err(|err| (err, String::new())),
        Err(err) => Err((Error::from(err), String::new())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err((err, input)) => {
            err.report_to_stderr(&input);
            ExitCode::FAILURE
        },
    }
}
