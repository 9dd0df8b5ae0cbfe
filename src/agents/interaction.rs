use crate::error::{BumpError, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Asks the user before each install when running with `--interactive`.
pub struct UpgradeInteraction {
    enabled: bool,
    apply_all: bool,
    input: Box<dyn BufRead>,
}

impl UpgradeInteraction {
    pub fn new(enabled: bool) -> Self {
        Self::with_input(enabled, Box::new(io::BufReader::new(io::stdin())))
    }

    pub fn with_input(enabled: bool, input: Box<dyn BufRead>) -> Self {
        Self {
            enabled,
            apply_all: false,
            input,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `Ok(false)` to skip this library and `UserCancelled` to stop the run.
    pub fn confirm_install(&mut self, library: &str, directive: &str) -> Result<bool> {
        if !self.enabled {
            return Ok(true);
        }

        println!(
            "\n{} {} {} {}",
            "[Install]".cyan().bold(),
            library.white().bold(),
            "via".dimmed(),
            directive.green()
        );

        if self.apply_all {
            println!("{}", "Auto-applying (previously selected 'all').".dimmed());
            return Ok(true);
        }

        loop {
            print!("{}", "Install this library? [Y/n/a/q]: ".bold());
            io::stdout().flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                return Err(BumpError::UserCancelled);
            }

            match answer.trim().to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => {
                    println!("{}", "Skipping this library.".dimmed());
                    return Ok(false);
                }
                "a" | "all" => {
                    println!(
                        "{}",
                        "Installing this and all remaining libraries.".green().bold()
                    );
                    self.apply_all = true;
                    return Ok(true);
                }
                "q" | "quit" => {
                    println!("{}", "Stopping upgrade at user request.".yellow());
                    return Err(BumpError::UserCancelled);
                }
                _ => {
                    println!(
                        "{}",
                        "Please answer with y(es), n(o), a(ll), or q(uit).".red()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(answers: &str) -> UpgradeInteraction {
        UpgradeInteraction::with_input(true, Box::new(Cursor::new(answers.to_string())))
    }

    #[test]
    fn disabled_always_confirms() {
        let mut interaction = UpgradeInteraction::with_input(false, Box::new(Cursor::new("")));
        assert!(interaction.confirm_install("numpy", "numpy").unwrap());
    }

    #[test]
    fn default_answer_is_yes() {
        assert!(scripted("\n").confirm_install("numpy", "numpy").unwrap());
    }

    #[test]
    fn no_skips_and_retries_on_garbage() {
        let mut interaction = scripted("maybe\nn\n");
        assert!(!interaction.confirm_install("numpy", "numpy").unwrap());
    }

    #[test]
    fn all_applies_to_later_libraries() {
        let mut interaction = scripted("a\n");
        assert!(interaction.confirm_install("numpy", "numpy").unwrap());
        assert!(interaction.confirm_install("requests", "requests").unwrap());
    }

    #[test]
    fn quit_and_eof_cancel() {
        assert!(matches!(
            scripted("q\n").confirm_install("numpy", "numpy"),
            Err(BumpError::UserCancelled)
        ));
        assert!(matches!(
            scripted("").confirm_install("numpy", "numpy"),
            Err(BumpError::UserCancelled)
        ));
    }
}
