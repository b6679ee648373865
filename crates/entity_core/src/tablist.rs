//! Player roster (tab list), decoupled from entity slots.
//!
//! A roster entry can exist without a spawned entity and vice versa. Entry
//! strings live in an append-only arena and are referred to by typed
//! handles, so entries stay `Copy` and cheap to re-set.

use std::fmt;

use crate::{EntityId, MAX_ENTITIES};

/// Handle into a `StringArena`. Only valid for the arena that minted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaRef(u32);

/// Append-only string storage. Strings are never moved or freed while the
/// arena lives, so handles stay valid for the whole session.
#[derive(Debug, Default)]
pub struct StringArena {
    strings: Vec<String>,
}

impl StringArena {
    /// Intern `s`, reusing an existing entry when one matches. Group names
    /// repeat heavily across a roster, so the scan pays for itself.
    pub fn intern(&mut self, s: &str) -> ArenaRef {
        if let Some(i) = self.strings.iter().position(|x| x == s) {
            return ArenaRef(i as u32);
        }
        self.strings.push(s.to_owned());
        ArenaRef((self.strings.len() - 1) as u32)
    }

    #[must_use]
    pub fn get(&self, r: ArenaRef) -> &str {
        &self.strings[r.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// One roster row. All text fields are arena handles.
#[derive(Clone, Copy, Debug)]
pub struct TabEntry {
    /// Account name (used for commands, skin lookup).
    pub player: ArenaRef,
    /// Name shown in the roster, may carry color codes.
    pub list: ArenaRef,
    /// Grouping header (team, world, rank).
    pub group: ArenaRef,
    /// Sort rank within the group; lower sorts first.
    pub rank: u8,
}

/// The session roster, indexed by the same 8-bit ids as the registry.
pub struct TabList {
    entries: Vec<Option<TabEntry>>,
    arena: StringArena,
}

impl Default for TabList {
    fn default() -> Self {
        Self {
            entries: (0..MAX_ENTITIES).map(|_| None).collect(),
            arena: StringArena::default(),
        }
    }
}

impl TabList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`. Returns whether an entry was
    /// replaced (servers re-send entries to update rank or group).
    pub fn set(&mut self, id: EntityId, player: &str, list: &str, group: &str, rank: u8) -> bool {
        let entry = TabEntry {
            player: self.arena.intern(player),
            list: self.arena.intern(list),
            group: self.arena.intern(group),
            rank,
        };
        self.entries[id.index()].replace(entry).is_some()
    }

    /// Remove the entry for `id`. Returns whether one existed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.entries[id.index()].take().is_some()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<TabEntryView<'_>> {
        self.entries[id.index()].map(|e| self.view(id, e))
    }

    #[must_use]
    pub fn is_valid(&self, id: EntityId) -> bool {
        self.entries[id.index()].is_some()
    }

    /// Drop every entry and reclaim the arena (leaving a world). Handles
    /// from before the reset must not be used again.
    pub fn reset(&mut self) {
        for e in &mut self.entries {
            *e = None;
        }
        self.arena = StringArena::default();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Entries in display order: by group, then rank, then list name.
    #[must_use]
    pub fn sorted(&self) -> Vec<TabEntryView<'_>> {
        let mut out: Vec<TabEntryView<'_>> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| self.view(EntityId::new(i as u8), e)))
            .collect();
        out.sort_by(|a, b| {
            a.group
                .cmp(b.group)
                .then(a.rank.cmp(&b.rank))
                .then(a.list.cmp(b.list))
        });
        out
    }

    fn view(&self, id: EntityId, e: TabEntry) -> TabEntryView<'_> {
        TabEntryView {
            id,
            player: self.arena.get(e.player),
            list: self.arena.get(e.list),
            group: self.arena.get(e.group),
            rank: e.rank,
        }
    }
}

/// Borrowed, resolved form of a roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabEntryView<'a> {
    pub id: EntityId,
    pub player: &'a str,
    pub list: &'a str,
    pub group: &'a str,
    pub rank: u8,
}

impl fmt::Display for TabEntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.group, self.list, self.player)
    }
}
