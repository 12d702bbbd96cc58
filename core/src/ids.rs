//! Sequential identifier allocation.
//!
//! Every category renders its identifiers as a fixed prefix followed by a
//! zero-padded counter (`P0001`, `STR012`, `RU0040`). The counter is the
//! source of truth; the string is presentation only. Loading existing
//! identifiers parses each suffix strictly: a stored identifier that does
//! not match its category's format means the persisted state is corrupt,
//! and that is surfaced as `SimError::MalformedId`, never repaired here.

use crate::error::{SimError, SimResult};

/// Prefix and minimum digit width for one identifier category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFormat {
    pub prefix: &'static str,
    pub width:  usize,
}

impl IdFormat {
    pub const fn new(prefix: &'static str, width: usize) -> Self {
        Self { prefix, width }
    }

    /// `render(7)` with `P`/4 gives `P0007`. Values wider than `width` are not truncated.
    pub fn render(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }

    /// Numeric suffix of `id`. The text after the prefix must be all ASCII digits.
    pub fn parse(&self, id: &str) -> SimResult<u64> {
        let malformed = || SimError::MalformedId {
            prefix: self.prefix,
            id:     id.to_string(),
        };
        let digits = id.strip_prefix(self.prefix).ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        digits.parse().map_err(|_| malformed())
    }

    /// Largest suffix among `ids`, or 0 when there are none.
    pub fn max_suffix<'a, I>(&self, ids: I) -> SimResult<u64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .try_fold(0u64, |max, id| Ok(max.max(self.parse(id)?)))
    }

    /// The identifier following the largest suffix in `ids` (suffix 1 when empty).
    pub fn next_after<'a, I>(&self, ids: I) -> SimResult<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(self.render(self.successor(self.max_suffix(ids)?)?))
    }

    /// `n + 1`, or `MalformedId` when `n` is the last representable suffix.
    fn successor(&self, n: u64) -> SimResult<u64> {
        n.checked_add(1).ok_or_else(|| SimError::MalformedId {
            prefix: self.prefix,
            id:     self.render(n),
        })
    }
}

/// Monotonic per-category counter.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    format: IdFormat,
    next:   u64,
}

impl IdAllocator {
    /// Start after the largest suffix found in `ids`.
    pub fn from_ids<'a, I>(format: IdFormat, ids: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let next = format.successor(format.max_suffix(ids)?)?;
        Ok(Self { format, next })
    }

    /// Never hand out a value below `persisted_next`, even if the
    /// rows that used it are gone.
    pub fn resume_from(mut self, persisted_next: Option<u64>) -> Self {
        if let Some(n) = persisted_next {
            self.next = self.next.max(n);
        }
        self
    }

    /// Account for an identifier that entered the category from elsewhere.
    pub fn observe(&mut self, id: &str) -> SimResult<()> {
        let n = self.format.parse(id)?;
        self.next = self.next.max(self.format.successor(n)?);
        Ok(())
    }

    /// Hand out the next value and its rendered identifier.
    pub fn allocate(&mut self) -> SimResult<(u64, String)> {
        let n = self.next;
        self.next = self.format.successor(n)?;
        Ok((n, self.format.render(n)))
    }

    pub fn peek_next(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: IdFormat = IdFormat::new("P", 4);
    const STORE: IdFormat = IdFormat::new("STR", 3);
    const RESOURCE: IdFormat = IdFormat::new("RU", 4);

    #[test]
    fn renders_zero_padded() {
        assert_eq!(PRODUCT.render(1), "P0001");
        assert_eq!(STORE.render(42), "STR042");
        assert_eq!(STORE.render(1234), "STR1234");
    }

    #[test]
    fn next_after_empty_is_one() {
        assert_eq!(PRODUCT.next_after(std::iter::empty()).unwrap(), "P0001");
    }

    #[test]
    fn next_after_uses_max_not_count() {
        let ids = ["P0003", "P0010", "P0002"];
        assert_eq!(PRODUCT.next_after(ids).unwrap(), "P0011");
    }

    #[test]
    fn parse_requires_exact_prefix() {
        assert_eq!(RESOURCE.parse("RU0040").unwrap(), 40);
        assert!(matches!(
            RESOURCE.parse("R0040"),
            Err(SimError::MalformedId { .. })
        ));
        assert!(matches!(
            STORE.parse("STR12a"),
            Err(SimError::MalformedId { .. })
        ));
        assert!(STORE.parse("STR").is_err());
    }

    #[test]
    fn malformed_member_fails_whole_set() {
        let ids = ["P0001", "X0002"];
        assert!(PRODUCT.next_after(ids).is_err());
    }

    #[test]
    fn allocator_is_monotonic_and_honours_persisted_counter() {
        let mut alloc = IdAllocator::from_ids(PRODUCT, ["P0004"]).unwrap();
        assert_eq!(alloc.allocate().unwrap(), (5, "P0005".to_string()));

        let mut resumed = IdAllocator::from_ids(PRODUCT, ["P0004"])
            .unwrap()
            .resume_from(Some(9));
        assert_eq!(resumed.allocate().unwrap().1, "P0009");
        assert_eq!(resumed.allocate().unwrap().1, "P0010");

        resumed.observe("P0020").unwrap();
        assert_eq!(resumed.peek_next(), 21);
        resumed.observe("P0003").unwrap();
        assert_eq!(resumed.peek_next(), 21);
    }

    #[test]
    fn last_representable_suffix_is_fatal_not_wrapped() {
        let top = format!("P{}", u64::MAX);
        assert!(matches!(
            IdAllocator::from_ids(PRODUCT, [top.as_str()]),
            Err(SimError::MalformedId { prefix: "P", .. })
        ));
        assert!(matches!(
            PRODUCT.next_after([top.as_str()]),
            Err(SimError::MalformedId { .. })
        ));

        let mut alloc = IdAllocator::from_ids(PRODUCT, ["P0001"]).unwrap();
        assert!(matches!(alloc.observe(&top), Err(SimError::MalformedId { .. })));

        let mut alloc = IdAllocator::from_ids(PRODUCT, std::iter::empty())
            .unwrap()
            .resume_from(Some(u64::MAX));
        assert!(alloc.allocate().is_err());
        assert_eq!(alloc.peek_next(), u64::MAX);
    }
}
