//! Common error types for the core building blocks.

/// Errors produced by the addressed transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The tag does not name any mailbox on this post.
    #[error("no recipient with tag {0}")]
    UnknownRecipient(usize),
    /// The recipient's mailbox has been dropped.
    #[error("mailbox {0} is closed")]
    MailboxClosed(usize),
}
