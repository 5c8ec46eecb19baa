use crate::domain::{DeadLetterQueue, Error};

/// Drops malformed commands after telling the user why.
#[derive(Default, Debug)]
pub struct StdErrDLQ {}

impl DeadLetterQueue for StdErrDLQ {
    fn report(&self, error: &Error) {
        tracing::warn!(%error, "dropped command");
        eprintln!("error: {}", error);
    }
}
