//! Marker-delimited blocks inside rc-style text.
//!
//! Everything here works on in-memory content; [`super::files`] does the IO.

/// Describes one managed block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    /// Opening marker line
    pub start_marker: String,
    /// Closing marker line
    pub end_marker: String,
    /// Lines between the markers
    pub body: Vec<String>,
    /// Substrings identifying leftovers of earlier or hand-edited installs
    pub stray_patterns: Vec<String>,
    /// Body lines left out when the file already has them outside the block
    pub shared_lines: Vec<String>,
    /// Exact lines removed only when they sit next to a removed stray line
    pub companion_lines: Vec<String>,
}

/// Installation state of a block within one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Neither the marker nor any stray reference is present
    Absent,
    /// The opening marker is present
    Present,
    /// No marker, but lines matching a stray pattern remain
    Stray,
}

impl BlockState {
    /// Lowercase label for status output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Stray => "stray",
        }
    }
}

impl std::fmt::Display for BlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn content_of(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r']).trim()
}

impl BlockSpec {
    fn is_start(&self, line: &str) -> bool {
        content_of(line) == self.start_marker
    }

    fn is_end(&self, line: &str) -> bool {
        content_of(line) == self.end_marker
    }

    fn is_stray(&self, line: &str) -> bool {
        self.stray_patterns
            .iter()
            .any(|p| !p.is_empty() && line.contains(p.as_str()))
    }

    fn is_shared(&self, body_line: &str) -> bool {
        self.shared_lines.iter().any(|s| s.trim() == body_line.trim())
    }

    fn is_companion(&self, line: &str) -> bool {
        let text = content_of(line);
        !text.is_empty() && self.companion_lines.iter().any(|c| c.trim() == text)
    }

    /// The block as it is appended: markers and body, newline-terminated
    #[must_use]
    pub fn render(&self) -> String {
        self.render_into("")
    }

    /// Like [`Self::render`], minus shared lines `content` already has.
    fn render_into(&self, content: &str) -> String {
        let mut out = String::new();
        out.push_str(&self.start_marker);
        out.push('\n');
        for line in &self.body {
            if self.is_shared(line) && content.lines().any(|l| content_of(l) == line.trim()) {
                continue;
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.end_marker);
        out.push('\n');
        out
    }
}

/// Classifies `content`.
#[must_use]
pub fn detect(content: &str, spec: &BlockSpec) -> BlockState {
    if content.lines().any(|l| spec.is_start(l)) {
        BlockState::Present
    } else if content.lines().any(|l| spec.is_stray(l)) {
        BlockState::Stray
    } else {
        BlockState::Absent
    }
}

/// Returns the new content with the block appended, or `None` when the
/// block is already present.
///
/// A blank separator line goes before the block. Content lacking a final
/// newline gets one first. Shared body lines already in `content` are not
/// repeated.
#[must_use]
pub fn install(content: &str, spec: &BlockSpec) -> Option<String> {
    if detect(content, spec) == BlockState::Present {
        return None;
    }
    let mut out = String::with_capacity(content.len() + 128);
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&spec.render_into(content));
    Some(out)
}

/// Returns the content with every marked span, its separator line and all
/// stray lines removed, or `None` when there was nothing to remove.
///
/// A marked span runs from the opening marker through the next closing
/// marker. Without a closing marker only the opening line and directly
/// following lines that match the expected body are taken. A stray line
/// opening an `if ...; then` also takes everything through its matching
/// `fi`. Companion lines go only when they border a removed stray line.
/// Unrelated `fi` lines are never touched.
#[must_use]
pub fn uninstall(content: &str, spec: &BlockSpec) -> Option<String> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut keep = vec![true; lines.len()];
    let mut stray = vec![false; lines.len()];

    let mut i = 0;
    while i < lines.len() {
        if !spec.is_start(lines[i]) {
            i += 1;
            continue;
        }
        let end = span_end(&lines, i, spec);
        for flag in &mut keep[i..=end] {
            *flag = false;
        }
        if i > 0 && keep[i - 1] && content_of(lines[i - 1]).is_empty() {
            keep[i - 1] = false;
        }
        i = end + 1;
    }

    let mut i = 0;
    while i < lines.len() {
        if keep[i] && spec.is_stray(lines[i]) {
            let end = if opens_if(lines[i]) {
                matching_fi(&lines, i).unwrap_or(i)
            } else {
                i
            };
            for (k, st) in keep[i..=end].iter_mut().zip(&mut stray[i..=end]) {
                *k = false;
                *st = true;
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for idx in 0..lines.len() {
            if !keep[idx] || !spec.is_companion(lines[idx]) {
                continue;
            }
            let before = idx > 0 && stray[idx - 1];
            let after = idx + 1 < lines.len() && stray[idx + 1];
            if before || after {
                keep[idx] = false;
                stray[idx] = true;
                changed = true;
            }
        }
    }

    if keep.iter().all(|k| *k) {
        return None;
    }
    Some(
        lines
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(l, _)| *l)
            .collect(),
    )
}

/// Last line index of the span opened at `start`.
fn span_end(lines: &[&str], start: usize, spec: &BlockSpec) -> usize {
    if let Some(offset) = lines[start + 1..].iter().position(|l| spec.is_end(l)) {
        return start + 1 + offset;
    }

    let mut end = start;
    let mut expected = spec.body.iter().peekable();
    for line in &lines[start + 1..] {
        let text = content_of(line);
        while expected
            .peek()
            .is_some_and(|b| text != b.trim() && spec.is_shared(b))
        {
            expected.next();
        }
        match expected.next() {
            Some(body_line) if text == body_line.trim() => end += 1,
            _ => break,
        }
    }
    end
}

fn opens_if(line: &str) -> bool {
    let text = content_of(line);
    text.starts_with("if ") && (text.ends_with("then") || text.ends_with("; then"))
}

fn closes_if(line: &str) -> bool {
    let text = content_of(line);
    text == "fi" || text.starts_with("fi ") || text.starts_with("fi;")
}

/// Index of the `fi` closing the `if` opened at `start`.
fn matching_fi(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        if opens_if(line) {
            depth += 1;
        } else if closes_if(line) {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}
