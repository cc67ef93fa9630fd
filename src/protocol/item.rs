use crate::error::Result;
use crate::protocol::command::{Action, entry, key_matches};
use crate::store::{Entries, Store};

/// A single key: `.../key/{key}`
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCmd {
    pub key: String,
    pub action: Action,
}

impl ItemCmd {
    pub fn new(key: impl Into<String>, action: Action) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }

    /// Match the first `/key/{key}` in the path, unless a `/value/` segment follows it
    pub fn parse(path: &str, action: Action) -> Option<Self> {
        let (key, rest) = key_matches(path).next()?;
        if rest.starts_with("/value/") {
            return None;
        }
        Some(Self::new(key, action))
    }

    /// Report `{key: value}`; a delete reports the value it removed
    pub fn execute(&self, store: &Store) -> Result<Entries> {
        let value = match self.action {
            Action::Read => store.get(&self.key)?,
            Action::Delete => store.delete(&self.key)?,
        };
        Ok(entry(&self.key, value))
    }
}
