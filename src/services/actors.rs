//! Static actor directory
//!
//! Actors are a fixed reference set loaded once at startup and never
//! mutated afterwards, so the directory is shared without locking.

/// A known actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRecord {
    pub id: String,
    pub name: String,
}

impl ActorRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActorDirectory {
    actors: Vec<ActorRecord>,
}

impl ActorDirectory {
    pub fn new(actors: Vec<ActorRecord>) -> Self {
        Self { actors }
    }

    /// The directory the server ships with
    pub fn seeded() -> Self {
        Self::new(vec![
            ActorRecord::new("williams", "Robin Williams"),
            ActorRecord::new("garfield", "Andrew Garfield"),
        ])
    }

    pub fn all(&self) -> &[ActorRecord] {
        &self.actors
    }

    /// Actors whose id appears in `ids`, in directory order.
    ///
    /// Unknown ids are skipped and repeated ids yield the actor once.
    pub fn matching<S: AsRef<str>>(&self, ids: &[S]) -> Vec<ActorRecord> {
        self.actors
            .iter()
            .filter(|actor| ids.iter().any(|id| id.as_ref() == actor.id))
            .cloned()
            .collect()
    }
}
