use std::fmt;

/// The set of tokens a terminal accepts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CharClass {
    /// Exactly this character.
    Exact(char),
    /// This ASCII letter in either case.
    CaseInsensitive(char),
    /// Any character in `lo..=hi`.
    Range(char, char),
}

impl CharClass {
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Exact(expected) => c == expected,
            CharClass::CaseInsensitive(expected) => c.eq_ignore_ascii_case(&expected),
            CharClass::Range(lo, hi) => (lo..=hi).contains(&c),
        }
    }
}

/// ABNF notation: `%x2F`, `%i"a"`, `%x30-39`.
impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Exact(c) => write!(f, "%x{:02X}", u32::from(*c)),
            CharClass::CaseInsensitive(c) => write!(f, "%i\"{c}\""),
            CharClass::Range(lo, hi) => write!(f, "%x{:02X}-{:02X}", u32::from(*lo), u32::from(*hi)),
        }
    }
}
