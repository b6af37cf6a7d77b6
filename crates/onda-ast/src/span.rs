// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A half-open byte range in a module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Precomputed line starts for byte-offset → line/column lookup.
///
/// Built once per module and kept alongside the source so tracebacks and
/// diagnostics can resolve positions without rescanning.
#[derive(Debug, Clone)]
pub struct LineMap {
    starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineMap { starts }
    }

    /// 1-based line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }

    /// Byte offset at which 1-based `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line.checked_sub(1)?).copied()
    }

    /// (line, column), both 1-based, for a byte offset.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        let col = offset - self.starts[line - 1] + 1;
        (line, col)
    }

    /// Source text of a 1-based line, without the trailing newline.
    pub fn line_text<'a>(&self, source: &'a str, line: usize) -> Option<&'a str> {
        let start = self.line_start(line)?;
        let end = self
            .starts
            .get(line)
            .map(|&next| next - 1)
            .unwrap_or(source.len());
        source.get(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_one_line() {
        let lm = LineMap::new("");
        assert_eq!(lm.line_count(), 1);
        assert_eq!(lm.locate(0), (1, 1));
    }

    #[test]
    fn offsets_resolve_to_lines_and_columns() {
        let src = "put(1)\nput(22)\nput(3)";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.locate(0), (1, 1));
        assert_eq!(lm.locate(5), (1, 6));
        assert_eq!(lm.locate(7), (2, 1));
        assert_eq!(lm.locate(16), (3, 2));
        assert_eq!(lm.line_text(src, 2), Some("put(22)"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn newline_offset_belongs_to_its_line() {
        let lm = LineMap::new("ab\ncd\n");
        assert_eq!(lm.line_of(2), 1);
        assert_eq!(lm.line_of(3), 2);
        assert_eq!(lm.line_of(5), 2);
    }

    #[test]
    fn trailing_newline_opens_an_empty_line() {
        let src = "ab\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 2);
        assert_eq!(lm.line_text(src, 2), Some(""));
    }

    #[test]
    fn span_join_covers_both() {
        let joined = Span::new(4, 7).to(Span::new(1, 5));
        assert_eq!(joined, Span::new(1, 7));
    }
}
