//! Outcome verifier - pass/fail checks with a running tally

use std::io::Write;

use crossterm::style::Stylize;

use crate::console::{Console, Input};

/// Verification counters for one session. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    ok: u32,
    error: u32,
}

impl Tally {
    pub fn ok(&self) -> u32 {
        self.ok
    }

    pub fn error(&self) -> u32 {
        self.error
    }

    pub fn total(&self) -> u32 {
        self.ok + self.error
    }

    pub fn all_ok(&self) -> bool {
        self.error == 0
    }

    fn record(&mut self, passed: bool) {
        if passed {
            self.ok = self.ok.saturating_add(1);
        } else {
            self.error = self.error.saturating_add(1);
        }
    }
}

impl<W: Write, I: Input> Console<W, I> {
    /// Compare by value, print a verdict line and count it
    pub fn verify<T: PartialEq>(&mut self, msg: &str, value: T, expect: T) -> bool {
        let passed = value == expect;
        self.tally.record(passed);
        if passed {
            self.line(format!("💚 {}", msg.to_string().green()));
        } else {
            tracing::info!(check = msg, "Verification failed");
            self.line(format!("💔 {}", msg.to_string().red()));
        }
        passed
    }
}
