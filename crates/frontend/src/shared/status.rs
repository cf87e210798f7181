/// Сообщение в строке статуса над очередью

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn style(&self) -> &'static str {
        match self.kind {
            StatusKind::Info => "margin: 8px 0; color: #555;",
            StatusKind::Success => "margin: 8px 0; color: #28a745;",
            StatusKind::Error => "margin: 8px 0; color: #dc3545;",
        }
    }
}
