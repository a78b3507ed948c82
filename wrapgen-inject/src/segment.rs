//! Marker-delimited file segmentation.
//!
//! ```text
//! pre       ← lines up to and including the start-marker line
//! injected  ← lines strictly between the markers (discarded on regeneration)
//! post      ← the end-marker line and everything after it
//! ```
//!
//! Lines keep their terminators, so `pre ++ injected ++ post` reproduces the
//! input byte-for-byte.

use wrapgen_core::Markers;

use crate::error::MarkerProblem;

/// A file's content split around its injection markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedFile {
    pub pre: Vec<String>,
    pub injected: Vec<String>,
    pub post: Vec<String>,
}

impl SegmentedFile {
    /// Split `content` around exactly one start and one end marker line.
    pub fn parse(content: &str, markers: &Markers) -> Result<Self, MarkerProblem> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let (start, end) = locate(&lines, markers)?;
        tracing::debug!("markers at lines {} and {}", start + 1, end + 1);

        Ok(Self {
            pre: owned(&lines[..=start]),
            injected: owned(&lines[start + 1..end]),
            post: owned(&lines[end..]),
        })
    }

    /// Previously injected region as one string.
    pub fn existing(&self) -> String {
        self.injected.concat()
    }

    /// `pre ++ rendered ++ post`.
    pub fn splice(&self, rendered: &str) -> String {
        let mut out = String::with_capacity(
            self.pre.iter().chain(&self.post).map(String::len).sum::<usize>() + rendered.len(),
        );
        for line in &self.pre {
            out.push_str(line);
        }
        // A start line without a terminator would glue onto the first rendered line.
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(rendered);
        for line in &self.post {
            out.push_str(line);
        }
        out
    }
}

/// Reject rendered text that contains either sentinel.
pub fn check_rendered(rendered: &str, markers: &Markers) -> Result<(), MarkerProblem> {
    match rendered
        .lines()
        .position(|l| l.contains(markers.start.as_str()) || l.contains(markers.end.as_str()))
    {
        Some(idx) => Err(MarkerProblem::RenderedContainsMarker { line: idx + 1 }),
        None => Ok(()),
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}

/// Zero-based `(start, end)` indices of the marker lines.
fn locate(lines: &[&str], markers: &Markers) -> Result<(usize, usize), MarkerProblem> {
    let mut start: Option<usize> = None;
    let mut end: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let is_start = line.contains(markers.start.as_str());
        let is_end = line.contains(markers.end.as_str());
        if is_start && is_end {
            return Err(MarkerProblem::SameLine { line: i + 1 });
        }
        if is_start {
            if let Some(first) = start {
                return Err(MarkerProblem::DuplicateStart { first: first + 1, second: i + 1 });
            }
            start = Some(i);
        } else if is_end {
            if let Some(first) = end {
                return Err(MarkerProblem::DuplicateEnd { first: first + 1, second: i + 1 });
            }
            end = Some(i);
        }
    }

    match (start, end) {
        (None, _) => Err(MarkerProblem::MissingStart),
        (Some(_), None) => Err(MarkerProblem::MissingEnd),
        (Some(s), Some(e)) if e < s => Err(MarkerProblem::EndBeforeStart { start: s + 1, end: e + 1 }),
        (Some(s), Some(e)) => Ok((s, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::default()
    }

    const WELL_FORMED: &str = "A\n# START INJECTION\nold\n# END INJECTION\nB\n";

    #[test]
    fn splits_into_three_segments() {
        let seg = SegmentedFile::parse(WELL_FORMED, &markers()).unwrap();
        assert_eq!(seg.pre, ["A\n", "# START INJECTION\n"]);
        assert_eq!(seg.injected, ["old\n"]);
        assert_eq!(seg.post, ["# END INJECTION\n", "B\n"]);
        assert_eq!(seg.existing(), "old\n");
    }

    #[test]
    fn segments_reassemble_byte_for_byte() {
        let content = "x\r\n// START INJECTION\r\n\r\nold\n// END INJECTION\ntail";
        let seg = SegmentedFile::parse(content, &markers()).unwrap();
        let joined = format!("{}{}{}", seg.pre.concat(), seg.existing(), seg.post.concat());
        assert_eq!(joined, content);
    }

    #[test]
    fn splice_discards_old_region() {
        let seg = SegmentedFile::parse(WELL_FORMED, &markers()).unwrap();
        assert_eq!(
            seg.splice("new\n"),
            "A\n# START INJECTION\nnew\n# END INJECTION\nB\n"
        );
    }

    #[test]
    fn adjacent_markers_have_empty_region() {
        let seg = SegmentedFile::parse("# START INJECTION\n# END INJECTION\n", &markers()).unwrap();
        assert!(seg.injected.is_empty());
        assert_eq!(seg.splice("x\n"), "# START INJECTION\nx\n# END INJECTION\n");
    }

    #[test]
    fn unterminated_start_line_gets_a_newline() {
        let seg = SegmentedFile {
            pre: vec!["# START INJECTION".to_string()],
            injected: vec![],
            post: vec!["# END INJECTION\n".to_string()],
        };
        assert_eq!(seg.splice("x\n"), "# START INJECTION\nx\n# END INJECTION\n");
    }

    #[test]
    fn missing_markers() {
        assert_eq!(
            SegmentedFile::parse("A\n# END INJECTION\n", &markers()).unwrap_err(),
            MarkerProblem::MissingStart
        );
        assert_eq!(
            SegmentedFile::parse("A\n# START INJECTION\nB\n", &markers()).unwrap_err(),
            MarkerProblem::MissingEnd
        );
        assert_eq!(SegmentedFile::parse("", &markers()).unwrap_err(), MarkerProblem::MissingStart);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = SegmentedFile::parse("# END INJECTION\nA\n# START INJECTION\n", &markers())
            .unwrap_err();
        assert_eq!(err, MarkerProblem::EndBeforeStart { start: 3, end: 1 });
    }

    #[test]
    fn duplicate_markers_are_rejected() {
        let err = SegmentedFile::parse(
            "# START INJECTION\n# START INJECTION\n# END INJECTION\n",
            &markers(),
        )
        .unwrap_err();
        assert_eq!(err, MarkerProblem::DuplicateStart { first: 1, second: 2 });

        let err = SegmentedFile::parse(
            "# START INJECTION\n# END INJECTION\n# END INJECTION\n",
            &markers(),
        )
        .unwrap_err();
        assert_eq!(err, MarkerProblem::DuplicateEnd { first: 2, second: 3 });
    }

    #[test]
    fn shared_line_is_rejected() {
        let err = SegmentedFile::parse("# START INJECTION END INJECTION\n", &markers()).unwrap_err();
        assert_eq!(err, MarkerProblem::SameLine { line: 1 });
    }

    #[test]
    fn custom_markers() {
        let m = Markers { start: "<<gen".to_string(), end: "gen>>".to_string() };
        let seg = SegmentedFile::parse("<<gen\nold\ngen>>\n", &m).unwrap();
        assert_eq!(seg.existing(), "old\n");
    }

    #[test]
    fn rendered_text_with_sentinel_is_flagged() {
        let m = markers();
        assert_eq!(check_rendered("a\nb\n", &m), Ok(()));
        assert_eq!(
            check_rendered("a\n# END INJECTION\n", &m),
            Err(MarkerProblem::RenderedContainsMarker { line: 2 })
        );
        assert_eq!(
            check_rendered("START INJECTION here\n", &m),
            Err(MarkerProblem::RenderedContainsMarker { line: 1 })
        );
    }
}
