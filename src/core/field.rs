//! Structural addressing into a configuration document.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a configuration document.
///
/// Paths are immutable; `child` and `index` return extended copies so a parent path
/// can be shared between sibling fields.
///
/// # Examples
///
/// ```rust
/// use netif_validate::core::FieldPath;
///
/// let baremetal = FieldPath::new("platform").child("baremetal");
/// assert_eq!(baremetal.child("libvirtURI").to_string(), "platform.baremetal.libvirtURI");
/// assert_eq!(baremetal.child("hosts").index(2).to_string(), "platform.baremetal.hosts[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Create a root path.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Key(root.into())],
        }
    }

    /// Extend the path with a named field.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.into()));
        Self { segments }
    }

    /// Extend the path with a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(root: &str) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = FieldPath::new("platform");
        let child = parent.child("baremetal");
        assert_eq!(parent.to_string(), "platform");
        assert_eq!(child.to_string(), "platform.baremetal");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(FieldPath::from("libvirtURI"), FieldPath::new("libvirtURI"));
    }

    #[test]
    fn test_root_index() {
        let path = FieldPath::new("hosts").index(1).child("bridge");
        assert_eq!(path.to_string(), "hosts[1].bridge");
    }
}
