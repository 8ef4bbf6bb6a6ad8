//! Append-only conversation log.

use super::message::Message;

/// Ordered, append-only sequence of messages.
///
/// Insertion order is display and replay order. Entries can only be added;
/// the whole log is dropped on session reset and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
