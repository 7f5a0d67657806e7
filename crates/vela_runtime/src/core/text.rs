//! Immutable string payload with small string optimization.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str;

const INLINE_CAP: usize = 22;

#[derive(Clone)]
pub enum Text {
    Inline { len: u8, buf: [u8; INLINE_CAP] },
    Heap(Rc<str>),
}

impl Text {
    pub const INLINE_CAP: usize = INLINE_CAP;

    pub fn new() -> Self {
        Self::Inline {
            len: 0,
            buf: [0u8; INLINE_CAP],
        }
    }

    pub fn from_str(s: &str) -> Self {
        if s.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..s.len()].copy_from_slice(s.as_bytes());
            return Self::Inline {
                len: s.len() as u8,
                buf,
            };
        }
        Self::Heap(Rc::from(s))
    }

    pub fn from_string(s: String) -> Self {
        if s.len() <= INLINE_CAP {
            return Self::from_str(&s);
        }
        Self::Heap(Rc::from(s))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Inline { len, buf } => {
                // Inline buffers are only ever filled from a `&str` prefix.
                unsafe { str::from_utf8_unchecked(&buf[..*len as usize]) }
            }
            Text::Heap(data) => data,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Text::Inline { len, .. } => *len as usize,
            Text::Heap(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of Unicode scalar values, not bytes.
    pub fn char_count(&self) -> usize {
        let s = self.as_str();
        if s.is_ascii() { s.len() } else { s.chars().count() }
    }

    pub fn concat2(a: &Text, b: &Text) -> Text {
        let total = a.len() + b.len();
        if total <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..a.len()].copy_from_slice(a.as_str().as_bytes());
            buf[a.len()..total].copy_from_slice(b.as_str().as_bytes());
            return Text::Inline {
                len: total as u8,
                buf,
            };
        }
        let mut s = String::with_capacity(total);
        s.push_str(a.as_str());
        s.push_str(b.as_str());
        Text::Heap(Rc::from(s))
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Text {}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::from_str(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::from_string(s)
    }
}
