use crate::error::Result;
use crate::protocol::command::{entry, key_matches, word_len};
use crate::store::{Entries, Store};

const VALUE_MARKER: &str = "/value/";

/// Store a value: `.../key/{key}/value/{value}`.
///
/// Key and value both come from the path; any request body is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCmd {
    pub key: String,
    pub value: String,
}

impl WriteCmd {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Match the first `/key/{key}/value/{value}` in the path
    pub fn parse(path: &str) -> Option<Self> {
        key_matches(path).find_map(|(key, rest)| {
            let value = rest.strip_prefix(VALUE_MARKER)?;
            let n = word_len(value);
            (n > 0).then(|| Self::new(key, &value[..n]))
        })
    }

    pub fn execute(&self, store: &Store) -> Result<Entries> {
        store.put(self.key.clone(), self.value.clone())?;
        Ok(entry(&self.key, self.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            WriteCmd::parse("/store/key/color/value/red"),
            Some(WriteCmd::new("color", "red"))
        );
        assert_eq!(
            WriteCmd::parse("/store/key/color/value/dark_red/extra"),
            Some(WriteCmd::new("color", "dark_red"))
        );
        // A later occurrence still matches when the first one does not
        assert_eq!(
            WriteCmd::parse("/store/key/a/key/b/value/c"),
            Some(WriteCmd::new("b", "c"))
        );
        assert_eq!(WriteCmd::parse("/store/key/color"), None);
        assert_eq!(WriteCmd::parse("/store/key/color/value/"), None);
    }

    #[test]
    fn test_execute_overwrites() {
        let store = Store::new();
        WriteCmd::new("color", "red").execute(&store).unwrap();
        let entries = WriteCmd::new("color", "blue").execute(&store).unwrap();

        assert_eq!(entries, entry("color", "blue".to_string()));
        assert_eq!(store.get("color").unwrap(), "blue");
    }
}
