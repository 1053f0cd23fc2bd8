//! Unified diff between original and canonical file contents.
//!
//! Line-based, longest-common-subsequence diff rendered in the standard
//! unified format: `---`/`+++` labels, `@@` hunk headers, three lines of
//! context, and `\ No newline at end of file` markers. Inputs here are
//! small JSON documents, so a quadratic LCS table is fine; pathological
//! sizes fall back to a whole-file replacement hunk.

const CONTEXT: usize = 3;
const MAX_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// A line and whether it was terminated by a newline (only ever false for
/// the last line of a file).
type Line<'a> = (&'a str, bool);

/// Render a unified diff, or `None` when the contents are identical.
pub fn unified(a_label: &str, b_label: &str, old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }
    let a = split_lines(old);
    let b = split_lines(new);
    let ops = diff_ops(&a, &b);

    // Line cursor positions before each op, plus the final position.
    let mut pos = Vec::with_capacity(ops.len() + 1);
    let (mut x, mut y) = (0usize, 0usize);
    for op in &ops {
        pos.push((x, y));
        match op {
            Op::Equal => {
                x += 1;
                y += 1;
            }
            Op::Delete => x += 1,
            Op::Insert => y += 1,
        }
    }
    pos.push((x, y));

    let mut out = format!("--- {}\n+++ {}\n", a_label, b_label);
    let mut k = 0;
    while k < ops.len() {
        if ops[k] == Op::Equal {
            k += 1;
            continue;
        }
        let hs = k.saturating_sub(CONTEXT);
        // Swallow equal runs of at most 2*CONTEXT so nearby changes share
        // a hunk; longer runs end the hunk after its trailing context.
        let mut j = k;
        let he = loop {
            while j < ops.len() && ops[j] != Op::Equal {
                j += 1;
            }
            let run_start = j;
            while j < ops.len() && ops[j] == Op::Equal {
                j += 1;
            }
            let run = j - run_start;
            if j == ops.len() || run > 2 * CONTEXT {
                break run_start + run.min(CONTEXT);
            }
        };
        render_hunk(&mut out, &a, &b, &ops[hs..he], pos[hs]);
        k = j;
    }
    Some(out)
}

fn split_lines(s: &str) -> Vec<Line<'_>> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<Line<'_>> = s.split('\n').map(|l| (l, true)).collect();
    if s.ends_with('\n') {
        lines.pop();
    } else if let Some(last) = lines.last_mut() {
        last.1 = false;
    }
    lines
}

fn diff_ops(a: &[Line<'_>], b: &[Line<'_>]) -> Vec<Op> {
    let (n, m) = (a.len(), b.len());
    if (n + 1).saturating_mul(m + 1) > MAX_CELLS {
        let mut ops = vec![Op::Delete; n];
        ops.extend(std::iter::repeat(Op::Insert).take(m));
        return ops;
    }
    let width = m + 1;
    let mut dp = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i * width + j] = if a[i] == b[j] {
                dp[(i + 1) * width + j + 1] + 1
            } else {
                dp[(i + 1) * width + j].max(dp[i * width + j + 1])
            };
        }
    }
    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(Op::Equal);
            i += 1;
            j += 1;
        } else if dp[(i + 1) * width + j] >= dp[i * width + j + 1] {
            ops.push(Op::Delete);
            i += 1;
        } else {
            ops.push(Op::Insert);
            j += 1;
        }
    }
    ops.extend(std::iter::repeat(Op::Delete).take(n - i));
    ops.extend(std::iter::repeat(Op::Insert).take(m - j));
    ops
}

fn render_hunk(out: &mut String, a: &[Line<'_>], b: &[Line<'_>], ops: &[Op], start: (usize, usize)) {
    let a_len = ops.iter().filter(|o| matches!(o, Op::Equal | Op::Delete)).count();
    let b_len = ops.iter().filter(|o| matches!(o, Op::Equal | Op::Insert)).count();
    out.push_str(&format!(
        "@@ -{} +{} @@\n",
        fmt_range(start.0, a_len),
        fmt_range(start.1, b_len)
    ));
    let (mut ai, mut bi) = start;
    for op in ops {
        match op {
            Op::Equal => {
                push_line(out, ' ', a[ai]);
                ai += 1;
                bi += 1;
            }
            Op::Delete => {
                push_line(out, '-', a[ai]);
                ai += 1;
            }
            Op::Insert => {
                push_line(out, '+', b[bi]);
                bi += 1;
            }
        }
    }
}

/// Unified range: 1-based start, count omitted when 1; an empty range
/// names the line before the change.
fn fmt_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

fn push_line(out: &mut String, sign: char, line: Line<'_>) {
    out.push(sign);
    out.push_str(line.0);
    out.push('\n');
    if !line.1 {
        out.push_str("\\ No newline at end of file\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_contents_produce_no_diff() {
        assert_eq!(unified("a/x", "b/x", "same\n", "same\n"), None);
    }

    #[test]
    fn test_single_line_change() {
        let old = "{\n    \"a\": 1\n}\n";
        let new = "{\n    \"a\": 2\n}\n";
        let out = unified("a/f.json", "b/f.json", old, new).unwrap();
        let expected = "--- a/f.json\n\
                        +++ b/f.json\n\
                        @@ -1,3 +1,3 @@\n \
                        {\n\
                        -    \"a\": 1\n\
                        +    \"a\": 2\n \
                        }\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_insertion_keeps_context() {
        let out = unified("a/f", "b/f", "a\nb\n", "a\nx\nb\n").unwrap();
        assert!(out.contains("@@ -1,2 +1,3 @@\n"));
        assert!(out.contains(" a\n+x\n b\n"));
    }

    #[test]
    fn test_missing_trailing_newline_is_marked() {
        let out = unified("a/f", "b/f", "a", "a\n").unwrap();
        assert!(out.contains("-a\n\\ No newline at end of file\n+a\n"));
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let old: String = (1..=20).map(|i| format!("l{}\n", i)).collect();
        let new = old.replace("l2\n", "x2\n").replace("l18\n", "x18\n");
        let out = unified("a/f", "b/f", &old, &new).unwrap();
        assert_eq!(out.matches("@@").count(), 4); // two hunks, two markers each
        assert!(out.contains("@@ -1,5 +1,5 @@\n"));
        assert!(out.contains("@@ -15,6 +15,6 @@\n"));
    }
}
