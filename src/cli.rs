use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docxport")]
#[command(version)]
#[command(about = "Export a plain-text transcript as a Word document", long_about = None)]
#[command(after_help = "Examples:\n  \
  docxport meeting.txt                 write meeting.docx\n  \
  whisper-cli ... | docxport -n call   write call.docx from stdin\n  \
  docxport -r request.json -p > a.docx handle a JSON export request")]
pub struct Cli {
    /// Transcript file path, HTTP URL, or - for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Document base name (default: input file name, else "transcript")
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Read a JSON export request {"text": ..., "filename": ...}
    #[arg(short = 'r', long = "request", value_name = "FILE", conflicts_with = "name")]
    pub request: Option<PathBuf>,

    /// Write the document into DIR
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        env = "DOCXPORT_OUTPUT_DIR"
    )]
    pub output_dir: Option<PathBuf>,

    /// Write the document to stdout, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Overwrite an existing document WITHOUT prompting
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Verbose logging
    #[arg(short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    pub fn is_stdin(&self) -> bool {
        self.input == "-"
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log filter for the chosen verbosity; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "docxport=debug"
        } else if self.is_very_quiet() {
            "docxport=error"
        } else if self.is_quiet() {
            "docxport=warn"
        } else {
            "docxport=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["docxport"]).unwrap();
        assert!(cli.is_stdin());
        assert!(!cli.is_http_url());
        assert_eq!(cli.log_filter(), "docxport=info");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["docxport", "https://host/t.txt", "-n", "x", "-qq"]).unwrap();
        assert!(cli.is_http_url());
        assert_eq!(cli.name.as_deref(), Some("x"));
        assert!(cli.is_very_quiet());
        assert_eq!(cli.log_filter(), "docxport=error");
    }

    #[test]
    fn test_pipe_is_quiet() {
        let cli = Cli::try_parse_from(["docxport", "-p", "a.txt"]).unwrap();
        assert!(cli.is_quiet());
        assert_eq!(cli.log_filter(), "docxport=warn");
    }

    #[test]
    fn test_request_conflicts_with_name() {
        assert!(Cli::try_parse_from(["docxport", "-r", "req.json", "-n", "x"]).is_err());
    }
}
