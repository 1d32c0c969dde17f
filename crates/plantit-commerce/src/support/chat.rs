//! Chat session and canned support replies.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::SupportConfig;
use crate::error::CommerceError;
use crate::schedule::ScheduledTask;

/// Opening message shown on the tech channel.
pub const GREETING: &str = "Hello! How can we help you today?";

/// Who a chat is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportChannel {
    #[default]
    Tech,
    Nursery,
}

impl SupportChannel {
    pub const ALL: [SupportChannel; 2] = [SupportChannel::Tech, SupportChannel::Nursery];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportChannel::Tech => "tech",
            SupportChannel::Nursery => "nursery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupportChannel::Tech => "Tech Team",
            SupportChannel::Nursery => "Nurseries",
        }
    }

    /// The automatic answer to any message on this channel.
    pub fn canned_reply(&self) -> &'static str {
        match self {
            SupportChannel::Tech => {
                "Thanks for reaching out! Our tech team will get back to you shortly \
                 with a solution."
            }
            SupportChannel::Nursery => {
                "Hello! Our nursery experts are here to help with your plant care needs. \
                 What specific assistance do you need?"
            }
        }
    }
}

impl fmt::Display for SupportChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportChannel {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tech" => Ok(SupportChannel::Tech),
            "nursery" | "nurseries" => Ok(SupportChannel::Nursery),
            other => Err(CommerceError::UnknownValue {
                kind: "support channel",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Support,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Position in the log, starting at 1.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub channel: SupportChannel,
    pub sent_at: DateTime<Utc>,
}

fn push(
    log: &watch::Sender<Vec<ChatMessage>>,
    sender: Sender,
    channel: SupportChannel,
    text: &str,
) -> ChatMessage {
    let mut message = ChatMessage {
        id: 0,
        text: text.to_string(),
        sender,
        channel,
        sent_at: Utc::now(),
    };
    log.send_modify(|messages| {
        message.id = messages.len() as u64 + 1;
        messages.push(message.clone());
    });
    message
}

/// A support conversation.
///
/// Every accepted message gets the channel's canned reply after the
/// configured delay. Dropping the session discards replies still on their
/// way.
#[derive(Debug)]
pub struct ChatSession {
    log: Arc<watch::Sender<Vec<ChatMessage>>>,
    reply_delay: Duration,
    pending: Vec<ScheduledTask>,
}

impl ChatSession {
    /// Open a session with the greeting already posted.
    pub fn new(config: &SupportConfig) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        let log = Arc::new(tx);
        push(&log, Sender::Support, SupportChannel::Tech, GREETING);
        Self {
            log,
            reply_delay: config.reply_delay(),
            pending: Vec::new(),
        }
    }

    /// Post a message. Blank input is ignored and returns `None`.
    pub fn send(&mut self, channel: SupportChannel, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!(channel = channel.as_str(), "blank chat message ignored");
            return None;
        }

        let message = push(&self.log, Sender::User, channel, text);
        tracing::debug!(
            channel = channel.as_str(),
            id = message.id,
            "chat message sent"
        );

        let log = self.log.clone();
        let reply = move || {
            push(&log, Sender::Support, channel, channel.canned_reply());
        };
        let task = ScheduledTask::after("support.reply", self.reply_delay, reply);
        self.pending.retain(ScheduledTask::is_pending);
        self.pending.push(task);
        Some(message)
    }

    /// Every message, in order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.borrow().clone()
    }

    /// What the given tab shows: that channel's support messages and all of
    /// the user's own.
    pub fn transcript(&self, channel: SupportChannel) -> Vec<ChatMessage> {
        self.log
            .borrow()
            .iter()
            .filter(|m| m.channel == channel || m.sender == Sender::User)
            .cloned()
            .collect()
    }

    /// Replies not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.pending.iter().filter(|task| task.is_pending()).count()
    }

    /// Deliver every outstanding reply now.
    pub fn deliver_replies(&mut self) -> usize {
        self.pending.drain(..).filter(|task| task.run_now()).count()
    }

    /// Receive the log whenever it grows.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ChatMessage>> {
        self.log.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::new(&SupportConfig::default())
    }

    #[test]
    fn test_opens_with_greeting() {
        let chat = session();
        let messages = chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, GREETING);
        assert_eq!(messages[0].sender, Sender::Support);
        assert_eq!(messages[0].channel, SupportChannel::Tech);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_message_ignored() {
        let mut chat = session();
        assert!(chat.send(SupportChannel::Tech, "   \n").is_none());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut chat = session();
        let sent = chat
            .send(SupportChannel::Nursery, "  My fern is yellowing ")
            .unwrap();
        assert_eq!(sent.id, 2);
        assert_eq!(sent.text, "My fern is yellowing");

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.pending_replies(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].sender, Sender::Support);
        assert_eq!(messages[2].channel, SupportChannel::Nursery);
        assert_eq!(messages[2].text, SupportChannel::Nursery.canned_reply());
        assert_eq!(chat.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcript_filters_support_by_channel() {
        let mut chat = session();
        chat.send(SupportChannel::Nursery, "hello nursery");
        tokio::time::sleep(Duration::from_secs(2)).await;

        let tech = chat.transcript(SupportChannel::Tech);
        assert_eq!(tech.len(), 2);
        assert_eq!(tech[0].text, GREETING);
        assert_eq!(tech[1].sender, Sender::User);

        let nursery = chat.transcript(SupportChannel::Nursery);
        assert_eq!(nursery.len(), 2);
        assert_eq!(nursery[1].text, SupportChannel::Nursery.canned_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_replies() {
        let mut chat = session();
        chat.send(SupportChannel::Tech, "app crashed");
        let log = chat.subscribe();
        drop(chat);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_deliver_replies_without_runtime() {
        let mut chat = session();
        chat.send(SupportChannel::Tech, "checkout froze");
        chat.send(SupportChannel::Nursery, "repotting tips?");
        assert_eq!(chat.pending_replies(), 2);

        assert_eq!(chat.deliver_replies(), 2);
        let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_channel() {
        let tech = "Tech".parse::<SupportChannel>().unwrap();
        assert_eq!(tech, SupportChannel::Tech);
        assert_eq!(
            "nurseries".parse::<SupportChannel>().unwrap(),
            SupportChannel::Nursery
        );
        assert!("billing".parse::<SupportChannel>().is_err());
    }
}
