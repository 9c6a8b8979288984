// src/notifier.rs
// Transient success/error messages shown to the player

use crossterm::style::{Stylize, style};

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints notifications on the terminal, errors on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("✅ {}", style(message).green().bold());
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", style(message).red().bold());
    }
}
