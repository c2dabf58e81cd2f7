//! The current error and success notices.

/// One error and one success message; each new one replaces the old.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    error: Option<String>,
    success: Option<String>,
}

impl Notices {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }
}
