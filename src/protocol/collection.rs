use crate::error::Result;
use crate::protocol::command::Action;
use crate::store::{Entries, Store};

/// The whole-store resource: `.../key`
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionCmd {
    pub action: Action,
}

impl CollectionCmd {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// Match a path ending in `/key`
    pub fn parse(path: &str, action: Action) -> Option<Self> {
        path.ends_with("/key").then(|| Self::new(action))
    }

    /// Report every entry; a delete reports the contents it cleared
    pub fn execute(&self, store: &Store) -> Result<Entries> {
        match self.action {
            Action::Read => store.snapshot(),
            Action::Delete => store.clear(),
        }
    }
}
