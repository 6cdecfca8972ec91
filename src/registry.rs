//! Topic name &lt;-&gt; numeric topic id registry.
//!
//! Index 0 is reserved and never bound to a topic; this lets an inbound SUBACK
//! carrying `topic_id == 0` unambiguously mean "this acknowledges the outstanding
//! wildcard subscription" rather than a normal one (see [`SubState`]).

#![allow(missing_docs)]

use crate::error::Error;
use crate::limits::{MAX_TOPIC_LENGTH, MAX_TOPIC_USED};
use heapless::String;

/// The sentinel id meaning "not yet assigned by the broker".
pub const UNASSIGNED: u16 = 0xFFFF;

/// Subscription state of a registered topic. Monotone within a session:
/// `None -> Pending -> Subscribed`, reset back to `None` on [`Registry::reset`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SubState {
    #[default]
    None,
    Pending,
    Subscribed,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String<MAX_TOPIC_LENGTH>,
    /// Only the low byte of the broker-provided id is kept, matching the
    /// wire behaviour this registry is modelling; this caps the effective
    /// namespace at 255 concurrently distinguishable ids. See module docs.
    id: u8,
    bound: bool,
    sub_state: SubState,
}

impl Default for Entry {
    fn default() -> Self {
        Entry {
            name: String::new(),
            id: 0,
            bound: false,
            sub_state: SubState::None,
        }
    }
}

/// Fixed-capacity table mapping topic names to the numeric ids a broker hands out.
#[derive(Debug)]
pub struct Registry {
    entries: [Entry; MAX_TOPIC_USED],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry; index 0 stays reserved forever.
    pub fn new() -> Self {
        Registry {
            entries: core::array::from_fn(|_| Entry::default()),
        }
    }

    /// Index of the first unoccupied slot (name empty), starting the search at 1.
    pub fn first_free(&self) -> Result<usize, Error> {
        self.entries[1..]
            .iter()
            .position(|e| e.name.is_empty())
            .map(|i| i + 1)
            .ok_or(Error::RegistryFull)
    }

    /// Place `name` into the first free slot, returning its index. The slot's
    /// numeric id is left unassigned until [`Registry::bind`] is called.
    pub fn declare(&mut self, name: &str) -> Result<usize, Error> {
        if name.len() > MAX_TOPIC_LENGTH {
            return Err(Error::TooLong);
        }
        let idx = self.first_free()?;
        let entry = &mut self.entries[idx];
        entry.name = String::try_from(name).map_err(|_| Error::TooLong)?;
        entry.id = 0;
        entry.bound = false;
        entry.sub_state = SubState::None;
        Ok(idx)
    }

    /// Bind the broker-assigned id to a slot. Only the low byte of `id` is kept.
    ///
    /// This matches the wire behaviour described in the module docs: brokers that
    /// hand out ids above 255 will alias with whatever else occupies that low byte.
    pub fn bind(&mut self, index: usize, id: u16) -> Result<(), Error> {
        let entry = self.entries.get_mut(index).ok_or(Error::UnknownTopic)?;
        entry.id = (id & 0xFF) as u8;
        entry.bound = true;
        Ok(())
    }

    /// Look up a slot by topic name.
    pub fn lookup_by_name(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| !e.name.is_empty() && e.name.as_str() == name)
    }

    /// Look up a slot by its (low-byte) broker id. Never matches index 0.
    pub fn lookup_by_id(&self, id: u16) -> Option<usize> {
        let low = (id & 0xFF) as u8;
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, e)| e.bound && e.id == low)
            .map(|(i, _)| i)
    }

    /// Set the subscription state of a slot.
    pub fn set_sub_state(&mut self, index: usize, state: SubState) -> Result<(), Error> {
        let entry = self.entries.get_mut(index).ok_or(Error::UnknownTopic)?;
        entry.sub_state = state;
        Ok(())
    }

    /// Current subscription state of a slot.
    pub fn sub_state(&self, index: usize) -> Option<SubState> {
        self.entries.get(index).map(|e| e.sub_state)
    }

    /// Topic name stored at a slot, if any.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries
            .get(index)
            .filter(|e| !e.name.is_empty())
            .map(|e| e.name.as_str())
    }

    /// The broker-assigned low-byte id at a slot, if bound.
    pub fn id(&self, index: usize) -> Option<u8> {
        self.entries.get(index).filter(|e| e.bound).map(|e| e.id)
    }

    /// Clear every slot back to its initial state. Index 0 stays reserved and is
    /// never touched (it was never written to begin with).
    ///
    /// Because every entry — including ones populated by a server-initiated
    /// REGISTER — lives in this fixed-capacity table rather than on a heap, this
    /// reclaims all of them; nothing is leaked across a session reset.
    pub fn reset(&mut self) {
        for entry in self.entries[1..].iter_mut() {
            *entry = Entry::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_bind_then_lookup_round_trips() {
        let mut reg = Registry::new();
        let idx = reg.declare("/a").unwrap();
        assert_eq!(reg.lookup_by_name("/a"), Some(idx));
        reg.bind(idx, 5).unwrap();
        assert_eq!(reg.lookup_by_id(5), Some(idx));
        assert_eq!(reg.id(idx), Some(5));
    }

    #[test]
    fn index_zero_is_never_assigned_by_declare() {
        let mut reg = Registry::new();
        let idx = reg.declare("/a").unwrap();
        assert_ne!(idx, 0);
    }

    #[test]
    fn reset_clears_all_but_reserved_slot() {
        let mut reg = Registry::new();
        let idx = reg.declare("/a").unwrap();
        reg.bind(idx, 5).unwrap();
        reg.set_sub_state(idx, SubState::Subscribed).unwrap();
        reg.reset();
        assert_eq!(reg.lookup_by_name("/a"), None);
        assert_eq!(reg.sub_state(idx), Some(SubState::None));
    }

    #[test]
    fn low_byte_truncation_matches_module_docs() {
        let mut reg = Registry::new();
        let idx = reg.declare("/a").unwrap();
        reg.bind(idx, 0x0105).unwrap();
        assert_eq!(reg.id(idx), Some(0x05));
    }
}
