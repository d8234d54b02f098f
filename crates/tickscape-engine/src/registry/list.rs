use crate::actor::Actor;

/// Stable handle to an actor in an [`ActorRegistry`].
///
/// Handles are never reused, so a handle to a removed actor stays dead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ActorHandle(u64);

#[derive(Debug)]
struct Entry {
    handle: ActorHandle,
    actor: Option<Actor>,
}

/// Ordered collection of actors.
///
/// Performance characteristics:
/// - `add()` is O(1)
/// - `remove()` is O(log n): entries are kept sorted by handle, so lookup is a binary
///   search; removed entries become tombstones and are compacted once they outnumber
///   the live ones
/// - iteration visits live actors in insertion order
#[derive(Debug, Default)]
pub struct ActorRegistry {
    entries: Vec<Entry>,
    next_handle: u64,
    live: usize,
}

impl ActorRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `actor`. It will be updated after every actor added before it.
    pub fn add(&mut self, actor: Actor) -> ActorHandle {
        let handle = ActorHandle(self.next_handle);
        self.next_handle += 1;

        log::trace!("actor {:?} added ({})", handle, actor.kind_name());

        self.entries.push(Entry {
            handle,
            actor: Some(actor),
        });
        self.live += 1;
        handle
    }

    /// Removes and returns the actor behind `handle`, or `None` if it is already gone.
    ///
    /// Relative order of the remaining actors is unchanged.
    pub fn remove(&mut self, handle: ActorHandle) -> Option<Actor> {
        let index = self.find(handle)?;
        let actor = self.entries[index].actor.take()?;
        self.live -= 1;

        let tombstones = self.entries.len() - self.live;
        if tombstones > self.live {
            self.entries.retain(|e| e.actor.is_some());
        }

        Some(actor)
    }

    #[inline]
    pub fn get(&self, handle: ActorHandle) -> Option<&Actor> {
        self.find(handle)
            .and_then(|i| self.entries[i].actor.as_ref())
    }

    #[inline]
    pub fn contains(&self, handle: ActorHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Visits every live actor mutably, in insertion order.
    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Actor),
    {
        for actor in self.entries.iter_mut().filter_map(|e| e.actor.as_mut()) {
            visit(actor);
        }
    }

    /// Iterates live actors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorHandle, &Actor)> {
        self.entries
            .iter()
            .filter_map(|e| e.actor.as_ref().map(|a| (e.handle, a)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn find(&self, handle: ActorHandle) -> Option<usize> {
        // Handles are issued in increasing order and entries are only appended
        // or retained, so `entries` stays sorted by handle.
        self.entries
            .binary_search_by(|e| e.handle.cmp(&handle))
            .ok()
    }
}
