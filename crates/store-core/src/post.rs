//! # Addressed Message Transport
//!
//! A [`Post`] routes messages to integer-tagged recipients; each recipient
//! owns the matching [`Mailbox`]. The pair is created together, one outlet
//! per tag, so a single post multiplexes traffic for a whole population of
//! recipients without collisions.
//!
//! Receives are non-blocking: [`Mailbox::poll`] returns immediately and the
//! caller backs off and retries. A receiver that pulls a message its current
//! phase cannot consume sets it aside with [`Mailbox::defer`]; deferred
//! messages are redelivered ahead of fresh ones on the next [`Mailbox::poll`],
//! which preserves per-sender ordering. [`Mailbox::poll_fresh`] skips the
//! deferred buffer and is what a phase waiting for one specific message uses,
//! so a deferred message cannot starve it.
//!
//! Sends never block. A send can only fail when the recipient's mailbox is
//! gone; callers log that and treat the protocol step as done.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::error::CoreError;

/// The sending half of an addressed transport. Cheap to clone.
pub struct Post<M> {
    outlets: Vec<mpsc::UnboundedSender<M>>,
}

impl<M> Clone for Post<M> {
    fn clone(&self) -> Self {
        Self {
            outlets: self.outlets.clone(),
        }
    }
}

impl<M: Send> Post<M> {
    /// Creates a post with `recipients` mailboxes, tagged `0..recipients`.
    pub fn new(recipients: usize) -> (Self, Vec<Mailbox<M>>) {
        let mut outlets = Vec::with_capacity(recipients);
        let mut mailboxes = Vec::with_capacity(recipients);
        for tag in 0..recipients {
            let (tx, rx) = mpsc::unbounded_channel();
            outlets.push(tx);
            mailboxes.push(Mailbox {
                tag,
                inbox: rx,
                deferred: VecDeque::new(),
            });
        }
        (Self { outlets }, mailboxes)
    }

    /// Delivers `message` to the mailbox with the given tag. Never blocks.
    pub fn send(&self, tag: usize, message: M) -> Result<(), CoreError> {
        let outlet = self
            .outlets
            .get(tag)
            .ok_or(CoreError::UnknownRecipient(tag))?;
        outlet
            .send(message)
            .map_err(|_| CoreError::MailboxClosed(tag))
    }
}

/// The receiving half for one tag: an ordered buffer of incoming messages
/// plus a deferred queue for messages set aside by a selective receiver.
pub struct Mailbox<M> {
    tag: usize,
    inbox: mpsc::UnboundedReceiver<M>,
    deferred: VecDeque<M>,
}

impl<M> Mailbox<M> {
    /// The tag this mailbox answers to.
    pub fn tag(&self) -> usize {
        self.tag
    }

    /// Non-blocking receive; deferred messages come back first.
    pub fn poll(&mut self) -> Option<M> {
        if let Some(message) = self.deferred.pop_front() {
            return Some(message);
        }
        self.inbox.try_recv().ok()
    }

    /// Non-blocking receive of fresh messages only, leaving the deferred
    /// queue untouched.
    pub fn poll_fresh(&mut self) -> Option<M> {
        self.inbox.try_recv().ok()
    }

    /// Sets a message aside unconsumed; it is redelivered by `poll` once the
    /// receiver is back in its dispatch loop.
    pub fn defer(&mut self, message: M) {
        self.deferred.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_by_tag() {
        let (post, mut boxes) = Post::new(3);
        post.send(1, "one").unwrap();
        post.send(2, "two").unwrap();

        assert_eq!(boxes[0].poll(), None);
        assert_eq!(boxes[1].poll(), Some("one"));
        assert_eq!(boxes[2].poll(), Some("two"));
        assert_eq!(boxes[2].poll(), None);
    }

    #[tokio::test]
    async fn unknown_tag_is_an_error() {
        let (post, _boxes) = Post::<u32>::new(2);
        assert!(matches!(
            post.send(5, 9),
            Err(CoreError::UnknownRecipient(5))
        ));
    }

    #[tokio::test]
    async fn dropped_mailbox_closes_the_outlet() {
        let (post, mut boxes) = Post::new(2);
        drop(boxes.remove(1));
        assert!(matches!(post.send(1, 9), Err(CoreError::MailboxClosed(1))));
        post.send(0, 7).unwrap();
        assert_eq!(boxes[0].poll(), Some(7));
    }

    #[tokio::test]
    async fn deferred_messages_come_back_first() {
        let (post, mut boxes) = Post::new(1);
        post.send(0, 1).unwrap();
        post.send(0, 2).unwrap();

        let first = boxes[0].poll().unwrap();
        assert_eq!(first, 1);
        boxes[0].defer(first);

        // A selective phase sees only fresh messages.
        assert_eq!(boxes[0].poll_fresh(), Some(2));
        // Back in the dispatch loop, the deferred message is redelivered.
        assert_eq!(boxes[0].poll(), Some(1));
        assert_eq!(boxes[0].poll(), None);
    }

    #[tokio::test]
    async fn defer_preserves_order() {
        let (post, mut boxes) = Post::new(1);
        for n in 1..=3 {
            post.send(0, n).unwrap();
        }
        for _ in 0..3 {
            let m = boxes[0].poll_fresh().unwrap();
            boxes[0].defer(m);
        }
        assert_eq!(boxes[0].poll(), Some(1));
        assert_eq!(boxes[0].poll(), Some(2));
        assert_eq!(boxes[0].poll(), Some(3));
    }
}
