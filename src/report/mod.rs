use std::io::{self, Write};

/// Output seam between the pipeline and the operator. Components report
/// through this trait instead of printing, so the console formatting stays in
/// one place and tests can capture everything.
pub trait Reporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    /// A raw line without a severity tag, for list entries.
    fn plain(&self, message: &str);
    /// Asks the operator a yes/no question. Only `y`/`yes` (case-insensitive)
    /// is a yes; everything else declines.
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[0;34m";
const RESET: &str = "\x1b[0m";

/// Severity-tagged colored console output.
pub struct Console;

impl Reporter for Console {
    fn info(&self, message: &str) {
        println!("{}[INFO]{} {}", BLUE, RESET, message);
    }

    fn success(&self, message: &str) {
        println!("{}[SUCCESS]{} {}", GREEN, RESET, message);
    }

    fn warning(&self, message: &str) {
        println!("{}[WARNING]{} {}", YELLOW, RESET, message);
    }

    fn error(&self, message: &str) {
        println!("{}[ERROR]{} {}", RED, RESET, message);
    }

    fn plain(&self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        print!("{} [y/N]: ", prompt);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
