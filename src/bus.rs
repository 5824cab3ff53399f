//! In-process broadcast channels.
//!
//! A `Hub` plays the part of a browsing context: any participant holding it
//! can join a named channel. Posting delivers an encoded copy of the message
//! to every other endpoint currently joined to that channel, never back to the
//! sender. Delivery is best effort; endpoints that went away are pruned on the
//! next post and nothing is retried.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::SyncError;
use crate::protocol::Message;

/// Declared role of a channel participant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    /// Holds canonical state. At most one per channel.
    Owner,
    /// Renders received state and forwards intents.
    Mirror,
}

struct Member {
    id: u64,
    role: Role,
    tx: Sender<String>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    channels: HashMap<String, Vec<Member>>,
}

#[derive(Clone, Default)]
pub struct Hub {
    registry: Arc<Mutex<Registry>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `channel` as `role`. Fails if an owner is asked for while another
    /// owner endpoint on the same channel is still alive.
    pub fn join(&self, channel: &str, role: Role) -> Result<Port, SyncError> {
        let (tx, rx) = mpsc::channel();
        let mut reg = self.lock();

        let owner_present = reg
            .channels
            .get(channel)
            .is_some_and(|members| members.iter().any(|m| m.role == Role::Owner));
        if role == Role::Owner && owner_present {
            return Err(SyncError::OwnerTaken(channel.to_string()));
        }
        let id = reg.next_id;
        reg.next_id += 1;
        reg.channels
            .entry(channel.to_string())
            .or_default()
            .push(Member { id, role, tx });
        drop(reg);

        log::debug!("{role:?} #{id} joined channel '{channel}'");
        Ok(Port {
            poster: Poster {
                hub: self.clone(),
                channel: channel.to_string(),
                id,
                role,
            },
            rx,
        })
    }

    /// Number of live endpoints on `channel`.
    pub fn listeners(&self, channel: &str) -> usize {
        self.lock().channels.get(channel).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Registry updates are single pushes/retains; a poisoned lock still holds a usable list.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn leave(&self, channel: &str, id: u64) {
        let mut reg = self.lock();
        if let Some(members) = reg.channels.get_mut(channel) {
            members.retain(|m| m.id != id);
            if members.is_empty() {
                reg.channels.remove(channel);
            }
        }
    }
}

/// Send-only half of an endpoint. Cheap to clone and shareable across threads.
#[derive(Clone)]
pub struct Poster {
    hub: Hub,
    channel: String,
    id: u64,
    role: Role,
}

impl Poster {
    /// Broadcast `msg` to every other endpoint on the channel.
    /// Returns how many endpoints it was handed to.
    pub fn post(&self, msg: &Message) -> Result<usize, SyncError> {
        let frame = msg.encode()?;
        let mut reg = self.hub.lock();
        let Some(members) = reg.channels.get_mut(&self.channel) else {
            return Ok(0);
        };

        let mut delivered = 0;
        members.retain(|m| {
            if m.id == self.id {
                return true;
            }
            match m.tx.send(frame.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });

        log::trace!(
            "{:?} #{} posted {} to {} listener(s)",
            self.role,
            self.id,
            msg.kind(),
            delivered
        );
        Ok(delivered)
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

/// A joined endpoint: posts through its `Poster`, receives on its own queue.
/// Dropping it leaves the channel.
pub struct Port {
    poster: Poster,
    rx: Receiver<String>,
}

impl Port {
    pub fn post(&self, msg: &Message) -> Result<usize, SyncError> {
        self.poster.post(msg)
    }

    pub fn poster(&self) -> Poster {
        self.poster.clone()
    }

    /// Next decodable message, if one is already queued.
    pub fn try_recv(&self) -> Option<Message> {
        while let Ok(frame) = self.rx.try_recv() {
            if let Some(msg) = self.decode(&frame) {
                return Some(msg);
            }
        }
        None
    }

    /// Wait up to `timeout` for the next decodable message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Message> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok(frame) => {
                    if let Some(msg) = self.decode(&frame) {
                        return Some(msg);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }

    /// Everything queued right now, in arrival order.
    pub fn drain(&self) -> Vec<Message> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    fn decode(&self, frame: &str) -> Option<Message> {
        match Message::decode(frame) {
            Ok(msg) => Some(msg),
            Err(e) => {
                log::debug!("#{} dropping undecodable frame {frame:?}: {e}", self.poster.id);
                None
            }
        }
    }
}

impl Drop for Port {
    fn drop(&mut self) {
        log::debug!(
            "{:?} #{} left channel '{}'",
            self.poster.role,
            self.poster.id,
            self.poster.channel
        );
        self.poster.hub.leave(&self.poster.channel, self.poster.id);
    }
}
