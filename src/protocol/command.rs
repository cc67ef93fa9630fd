use crate::error::{Error, Result};
use crate::protocol::collection::CollectionCmd;
use crate::protocol::http::Method;
use crate::protocol::item::ItemCmd;
use crate::protocol::write::WriteCmd;
use crate::store::{Entries, Store};

/// Segment every resource path must contain
const STORE_SEGMENT: &str = "store";
const KEY_MARKER: &str = "/key/";

/// What a GET or DELETE does to the resource it addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Delete,
}

/// Store commands, one per resource shape
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// GET or DELETE .../key
    Collection(CollectionCmd),
    /// GET or DELETE .../key/{key}
    Item(ItemCmd),
    /// PUT or POST .../key/{key}/value/{value}
    Write(WriteCmd),
}

impl Command {
    /// Resolve a request method and path into a command
    pub fn from_request(method: &Method, path: &str) -> Result<Self> {
        let action = match method {
            Method::Get => Some(Action::Read),
            Method::Delete => Some(Action::Delete),
            Method::Put | Method::Post => None,
            Method::Other(token) => return Err(Error::UnsupportedMethod(token.clone())),
        };

        if !path.split('/').any(|segment| segment == STORE_SEGMENT) {
            return Err(Error::ResourceNotFound(format!(
                "Resource Not Found: {}",
                path
            )));
        }

        let cmd = match action {
            Some(action) => CollectionCmd::parse(path, action)
                .map(Command::Collection)
                .or_else(|| ItemCmd::parse(path, action).map(Command::Item)),
            None => WriteCmd::parse(path).map(Command::Write),
        };

        cmd.ok_or_else(|| Error::ResourceNotFound(format!("Path not found {}", path)))
    }

    /// Execute the command on the given store, returning the entries to report
    pub fn execute(&self, store: &Store) -> Result<Entries> {
        match self {
            Command::Collection(cmd) => cmd.execute(store),
            Command::Item(cmd) => cmd.execute(store),
            Command::Write(cmd) => cmd.execute(store),
        }
    }
}

/// Length of the leading run of `[A-Za-z0-9_]` in `s`
pub(crate) fn word_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

/// Every `/key/<word>` occurrence in `path`, left to right, as `(key, rest_after_key)`
pub(crate) fn key_matches(path: &str) -> impl Iterator<Item = (&str, &str)> {
    let bytes = path.as_bytes();
    (0..bytes.len())
        .filter(move |&i| bytes[i..].starts_with(KEY_MARKER.as_bytes()))
        .filter_map(move |i| {
            let rest = &path[i + KEY_MARKER.len()..];
            let n = word_len(rest);
            (n > 0).then(|| (&rest[..n], &rest[n..]))
        })
}

/// Single-entry JSON object `{key: value}`
pub(crate) fn entry(key: &str, value: String) -> Entries {
    let mut entries = Entries::with_capacity(1);
    entries.insert(key.to_string(), value);
    entries
}
