use std::fmt;
use tracing::error;

/// Longest message an [`ErrorRecord`] retains, terminator excluded.
pub const ERR_MSG_MAX: usize = 128;

const DEFAULT_MSG: &str = "No error msg";

/// Fixed-size error slot owned by the caller and overwritten by failing calls.
///
/// The message lives in an inline buffer and is always NUL-terminated, so the
/// record never allocates and can sit on the stack.
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    code: i32,
    message: [u8; ERR_MSG_MAX + 1],
}

impl ErrorRecord {
    pub fn new() -> Self {
        Self {
            code: 0,
            message: [0; ERR_MSG_MAX + 1],
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        let end = self
            .message
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(ERR_MSG_MAX);
        // Only whole UTF-8 sequences are ever copied in, see `set`.
        std::str::from_utf8(&self.message[..end]).unwrap_or_default()
    }

    /// Raw message bytes including the terminating NUL.
    pub fn message_bytes_with_nul(&self) -> &[u8] {
        let end = self.message().len();
        &self.message[..=end]
    }

    pub fn is_set(&self) -> bool {
        self.code != 0 || self.message[0] != 0
    }

    fn set(&mut self, code: i32, message: &str) {
        let mut len = message.len().min(ERR_MSG_MAX);
        while !message.is_char_boundary(len) {
            len -= 1;
        }

        self.code = code;
        self.message[..len].copy_from_slice(&message.as_bytes()[..len]);
        self.message[len] = 0;
    }
}

impl Default for ErrorRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@Error: code -> {}, message -> {}", self.code, self.message())
    }
}

impl fmt::Debug for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRecord")
            .field("code", &self.code)
            .field("message", &self.message())
            .finish()
    }
}

/// Write `code` and `message` into `target`.
///
/// A missing target cannot be signalled back to the caller, so it is logged
/// and otherwise ignored. A missing message stores a fixed placeholder.
pub fn report(target: Option<&mut ErrorRecord>, code: i32, message: Option<&str>) {
    let Some(target) = target else {
        error!(code, message = message.unwrap_or(DEFAULT_MSG), "Fatal error: error record is absent");
        return;
    };

    target.set(code, message.unwrap_or(DEFAULT_MSG));
}
