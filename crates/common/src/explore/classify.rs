use crate::storage::RawEntry;

/// The two node shapes a raw listing row can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Object,
}

/// Classification of one raw listing row: its kind, display name and
/// fully-qualified path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: EntryKind,
    pub name: String,
    pub fqpn: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// A row with neither an object key nor a common prefix. Backends do
    /// not produce these; surfacing them beats silently guessing a type.
    #[error("listing entry carries neither an object key nor a common prefix")]
    EmptyEntry,
}

/// Map one raw listing row to `(kind, name, fqpn)`.
///
/// A grouping row becomes a directory whose name and path are the
/// common-prefix string itself (trailing delimiter retained). An object
/// row keeps its key as the path, and its name is the final non-empty
/// segment after splitting on the delimiter; a key without the delimiter
/// is its own name.
pub fn classify(entry: &RawEntry, delimiter: &str) -> Result<Classified, ClassifyError> {
    if entry.key.is_empty() {
        if entry.common_prefix.is_empty() {
            return Err(ClassifyError::EmptyEntry);
        }
        return Ok(Classified {
            kind: EntryKind::Directory,
            name: entry.common_prefix.clone(),
            fqpn: entry.common_prefix.clone(),
        });
    }

    Ok(Classified {
        kind: EntryKind::Object,
        name: object_display_name(&entry.key, delimiter),
        fqpn: entry.key.clone(),
    })
}

fn object_display_name(key: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return key.to_string();
    }
    key.rsplit(delimiter)
        .find(|segment| !segment.is_empty())
        .unwrap_or(key)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_row() {
        let entry = RawEntry::grouping("a/b/");
        let classified = classify(&entry, "/").unwrap();
        assert_eq!(classified.kind, EntryKind::Directory);
        assert_eq!(classified.name, "a/b/");
        assert_eq!(classified.fqpn, "a/b/");
    }

    #[test]
    fn test_object_row() {
        let entry = RawEntry::object("a/b/c.txt");
        let classified = classify(&entry, "/").unwrap();
        assert_eq!(classified.kind, EntryKind::Object);
        assert_eq!(classified.name, "c.txt");
        assert_eq!(classified.fqpn, "a/b/c.txt");
    }

    #[test]
    fn test_object_without_delimiter() {
        let entry = RawEntry::object("readme");
        let classified = classify(&entry, "/").unwrap();
        assert_eq!(classified.name, "readme");
        assert_eq!(classified.fqpn, "readme");
    }

    #[test]
    fn test_placeholder_object_name() {
        // a key ending in the delimiter names its final non-empty segment
        let entry = RawEntry::object("a/b/");
        let classified = classify(&entry, "/").unwrap();
        assert_eq!(classified.kind, EntryKind::Object);
        assert_eq!(classified.name, "b");
        assert_eq!(classified.fqpn, "a/b/");
    }

    #[test]
    fn test_empty_row_is_an_error() {
        let entry = RawEntry::default();
        assert_eq!(classify(&entry, "/"), Err(ClassifyError::EmptyEntry));
    }

    #[test]
    fn test_object_wins_over_prefix() {
        // a row carrying both fields is an object row; only an empty key
        // marks a grouping
        let mut entry = RawEntry::object("a/b");
        entry.common_prefix = "a/".to_string();
        let classified = classify(&entry, "/").unwrap();
        assert_eq!(classified.kind, EntryKind::Object);
    }
}
