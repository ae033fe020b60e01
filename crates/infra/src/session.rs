//! Line-oriented session loop: read, tokenize, dispatch, print.

use std::io::{self, BufRead, Write};

use crate::command_dispatcher::{CommandDispatcher, Outcome};

/// Counters for one session, logged when input ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: u64,
    pub applied: u64,
    pub reports: u64,
    pub rejected: u64,
}

/// Run commands from `input` until end of input, writing responses to `output`.
///
/// Blank lines are skipped. Invalid UTF-8 is replaced rather than treated as fatal, so
/// only I/O failures end the session early.
pub fn run<R, W>(dispatcher: &mut CommandDispatcher, mut input: R, mut output: W) -> io::Result<SessionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = SessionStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        stats.commands += 1;
        let outcome = dispatcher.dispatch(&tokens);
        match &outcome {
            Outcome::Applied(_) => stats.applied += 1,
            Outcome::Report(_) => stats.reports += 1,
            Outcome::Rejected(_) => stats.rejected += 1,
        }

        if let Some(text) = outcome.render() {
            writeln!(output, "{text}")?;
            output.flush()?;
        }
    }

    tracing::debug!(
        commands = stats.commands,
        applied = stats.applied,
        reports = stats.reports,
        rejected = stats.rejected,
        "end of input"
    );
    Ok(stats)
}
