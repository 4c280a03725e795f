// src/prompt.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Interactive parameter collection.
//!
//! Every question goes through [`Prompter::ask_until_valid`]: an answer is
//! either valid (returned) or invalid (message, ask again), and after
//! `max_attempts` invalid answers in a row the prompt gives up. The bucket
//! selection is the exception: a bad selection is fatal, not retried.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_ATTEMPTS, RETENTION_DATE_EXAMPLE};
use crate::retention::RetentionDate;

pub const BUCKET_QUESTION: &str = "\nEnter the number of the bucket with ObjectLock you want to use: ";
pub const RETENTION_QUESTION: &str = "Specify retention date using ISO 8601 format (Example: ";
pub const COUNT_QUESTION: &str = "Enter the number of objects to create: ";
pub const PREFIX_QUESTION: &str = "Enter object prefix to be used for this serie of locked objects: ";
pub const START_INDEX_QUESTION: &str = "Enter the initial index to use for the objects: ";

pub const INVALID_DATE_MSG: &str = "Invalid Date Format. Please Retry.";
pub const INVALID_NUMBER_MSG: &str = "Please enter a valid number.";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("input closed while waiting for: {0}")]
    EndOfInput(String),

    #[error("gave up on {what} after {attempts} invalid answers")]
    TooManyAttempts { what: &'static str, attempts: usize },

    #[error("{0:?} is not a bucket number")]
    InvalidSelection(String),

    #[error("bucket number {selected} is out of range (1..={available})")]
    SelectionOutOfRange { selected: usize, available: usize },
}

/// Where a single question currently stands.
enum InputState<T> {
    Awaiting,
    Valid(T),
    InvalidRetry,
}

/// Reads answers from `input`, writes questions and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read one line, without its line terminator.
    pub fn read_answer(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput(question.trim().to_string()));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Ask `question` until `parse` accepts the answer, printing `invalid_msg`
    /// after each rejected one.
    pub fn ask_until_valid<T, F>(
        &mut self,
        what: &'static str,
        question: &str,
        invalid_msg: &str,
        parse: F,
    ) -> Result<T, PromptError>
    where
        F: Fn(&str) -> Option<T>,
    {
        let mut state = InputState::Awaiting;
        let mut invalid = 0;
        loop {
            state = match state {
                InputState::Valid(value) => return Ok(value),
                InputState::InvalidRetry if invalid >= self.max_attempts => {
                    return Err(PromptError::TooManyAttempts {
                        what,
                        attempts: invalid,
                    });
                }
                InputState::InvalidRetry => {
                    writeln!(self.output, "{invalid_msg}")?;
                    InputState::Awaiting
                }
                InputState::Awaiting => {
                    let answer = self.read_answer(question)?;
                    match parse(&answer) {
                        Some(value) => InputState::Valid(value),
                        None => {
                            invalid += 1;
                            debug!("rejected {what} answer {answer:?} ({invalid}/{})", self.max_attempts);
                            InputState::InvalidRetry
                        }
                    }
                }
            };
        }
    }

    /// 1-based choice from `buckets`. Anything but a number in range is fatal.
    pub fn select_bucket<'a>(&mut self, buckets: &'a [String]) -> Result<&'a str, PromptError> {
        let answer = self.read_answer(BUCKET_QUESTION)?;
        let selected: usize = answer
            .trim()
            .parse()
            .map_err(|_| PromptError::InvalidSelection(answer.clone()))?;

        let bucket = selected
            .checked_sub(1)
            .and_then(|idx| buckets.get(idx))
            .ok_or(PromptError::SelectionOutOfRange {
                selected,
                available: buckets.len(),
            })?;
        writeln!(self.output, "Selected bucket: {bucket}")?;
        Ok(bucket.as_str())
    }

    pub fn retention_date(&mut self) -> Result<RetentionDate, PromptError> {
        let question = format!("{RETENTION_QUESTION}{RETENTION_DATE_EXAMPLE}): ");
        let date = self.ask_until_valid("retention date", &question, INVALID_DATE_MSG, |s| {
            RetentionDate::parse(s).ok()
        })?;
        if date.is_in_past() {
            warn!("retention date {date} is not in the future; the server will likely reject the uploads");
        }
        Ok(date)
    }

    pub fn object_count(&mut self) -> Result<u64, PromptError> {
        self.ask_until_valid("object count", COUNT_QUESTION, INVALID_NUMBER_MSG, parse_digits)
    }

    /// Free text, not validated.
    pub fn prefix(&mut self) -> Result<String, PromptError> {
        self.read_answer(PREFIX_QUESTION)
    }

    pub fn start_index(&mut self) -> Result<u64, PromptError> {
        self.ask_until_valid("start index", START_INDEX_QUESTION, INVALID_NUMBER_MSG, parse_digits)
    }
}

/// Non-empty, ASCII digits only, fits in a u64.
pub fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("0"), Some(0));
        assert_eq!(parse_digits("0042"), Some(42));
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("-1"), None);
        assert_eq!(parse_digits("+1"), None);
        assert_eq!(parse_digits(" 5"), None);
        assert_eq!(parse_digits("1.5"), None);
        assert_eq!(parse_digits("99999999999999999999999"), None);
    }

    #[test]
    fn test_count_reprompts_until_digits() {
        let mut p = prompter("abc\n-3\n\n7\n");
        assert_eq!(p.object_count().unwrap(), 7);
        let out = printed(p);
        assert_eq!(out.matches(COUNT_QUESTION).count(), 4);
        assert_eq!(out.matches(INVALID_NUMBER_MSG).count(), 3);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let mut p = prompter("12\r\n");
        assert_eq!(p.start_index().unwrap(), 12);
    }

    #[test]
    fn test_retention_reprompts_on_bad_format() {
        let mut p = prompter("31/12/2024\n2024-12-31 00:00:00\n2024-12-31T00:00:00Z\n");
        let date = p.retention_date().unwrap();
        assert_eq!(date.to_string(), "2024-12-31T00:00:00Z");
        let out = printed(p);
        assert_eq!(out.matches(INVALID_DATE_MSG).count(), 2);
        assert!(out.contains("(Example: 2024-12-31T00:00:00Z): "));
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut p = prompter("x\ny\nz\n5\n").with_max_attempts(3);
        match p.object_count() {
            Err(PromptError::TooManyAttempts { what, attempts }) => {
                assert_eq!(what, "object count");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected TooManyAttempts, got {other:?}"),
        }
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("oops\n");
        assert!(matches!(p.start_index(), Err(PromptError::EndOfInput(_))));
    }

    #[test]
    fn test_prefix_is_free_text() {
        let mut p = prompter(" any thing/ \n");
        assert_eq!(p.prefix().unwrap(), " any thing/ ");
        let mut p = prompter("\n");
        assert_eq!(p.prefix().unwrap(), "");
    }

    #[test]
    fn test_select_bucket() {
        let buckets: Vec<String> = ["alpha", "beta", "gamma"].iter().map(|s| s.to_string()).collect();

        let mut p = prompter("2\n");
        assert_eq!(p.select_bucket(&buckets).unwrap(), "beta");
        assert!(printed(p).contains("Selected bucket: beta"));

        let mut p = prompter("4\n");
        assert!(matches!(
            p.select_bucket(&buckets),
            Err(PromptError::SelectionOutOfRange { selected: 4, available: 3 })
        ));

        let mut p = prompter("0\n");
        assert!(matches!(p.select_bucket(&buckets), Err(PromptError::SelectionOutOfRange { .. })));

        let mut p = prompter("two\n");
        assert!(matches!(p.select_bucket(&buckets), Err(PromptError::InvalidSelection(_))));
    }

    #[test]
    fn test_select_from_empty_list_is_fatal() {
        let mut p = prompter("1\n");
        assert!(matches!(
            p.select_bucket(&[]),
            Err(PromptError::SelectionOutOfRange { selected: 1, available: 0 })
        ));
    }
}
