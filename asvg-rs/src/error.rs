use ariadne::Source;
use std::{fmt, io};

/// Utility enum to package the errors that can occur while running a script.
#[derive(Debug)]
pub enum Error {
    /// The command line arguments could not be understood.
    Usage(String),

    /// Reading the script or writing the document failed.
    Io(io::Error),

    /// The script could not be parsed or run.
    Script(asvg_error::Error),
}

impl Error {
    /// Report this [`Error`] to stderr.
    ///
    /// Script errors are rendered as a report pointing into `input`, the source of the script.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Script(err) => {
                let report = err.build_report("input");
                if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                    eprintln!("{}\n({})", err, io_err);
                }
            },
            _ => eprintln!("{}", self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{}\n\n{}", msg, crate::USAGE),
            Self::Io(err) => write!(f, "{}", err),
            Self::Script(err) => write!(f, "{}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<asvg_error::Error> for Error {
    fn from(err: asvg_error::Error) -> Self {
        Self::Script(err)
    }
}
