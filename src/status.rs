//! User-facing progress reporting.
//!
//! Operations never print directly; they report through a [`StatusSink`]
//! handed in by the caller. The CLI passes [`ConsoleStatus`]; tests pass
//! [`MemoryStatus`] and inspect what was reported.

/// Receives progress and completion messages from an operation.
pub trait StatusSink {
    fn update(&mut self, message: &str);
}

/// Writes status lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn update(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Records status lines in memory.
#[derive(Debug, Default)]
pub struct MemoryStatus {
    pub messages: Vec<String>,
}

impl StatusSink for MemoryStatus {
    fn update(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_status_records_in_order() {
        let mut status = MemoryStatus::default();
        status.update("Merging...");
        status.update("Finished: merged.pdf written.");
        assert_eq!(
            status.messages,
            vec!["Merging...", "Finished: merged.pdf written."]
        );
    }
}
