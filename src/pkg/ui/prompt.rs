use std::io::{BufRead, Write};

use crate::pkg::internal::controller::Confirm;

/// Asks on the terminal; anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        // called from async code on the multi-threaded runtime
        let read = tokio::task::block_in_place(|| std::io::stdin().lock().read_line(&mut answer));
        match read {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::error!("could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// `--yes` on the command line.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("auto-confirmed: {}", prompt);
        true
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{is_yes, AssumeYes};
    use crate::pkg::internal::controller::Confirm;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("delete?"));
    }
}
