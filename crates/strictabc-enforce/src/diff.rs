//! Line diff of rendered signatures with character guide lines.
//!
//! Output lines are prefixed with `- ` (expected only), `+ ` (actual only),
//! or `  ` (both). When a removed line and an added line are similar enough
//! to be edits of each other, each is followed by a `? ` guide line marking
//! the differing characters: `^` changed, `-` removed, `+` inserted.
//!
//! The diff is explanatory only. Pass/fail decisions come from
//! [`compare`](crate::compare::compare).

/// Minimum similarity ratio for two lines to be shown as an edit pair.
pub const PAIR_CUTOFF: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Equal,
    Delete,
    Insert,
}

/// A run of aligned items. Lengths are counted on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Equal(usize),
    Delete(usize),
    Insert(usize),
    Replace(usize, usize),
}

fn lcs_table<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Vec<usize>> {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }
    dp
}

/// Align two sequences along a longest common subsequence.
///
/// Ties prefer consuming from `a` first, so deletions precede insertions
/// inside a changed run.
fn steps<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Step> {
    let dp = lcs_table(a, b);
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(Step::Equal);
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            out.push(Step::Delete);
            i += 1;
        } else {
            out.push(Step::Insert);
            j += 1;
        }
    }
    out.extend(std::iter::repeat(Step::Delete).take(a.len() - i));
    out.extend(std::iter::repeat(Step::Insert).take(b.len() - j));
    out
}

/// Group alignment steps into runs; a changed run touching both sides is a replace.
pub(crate) fn opcodes<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Op> {
    let mut ops = Vec::new();
    let (mut equal, mut deleted, mut inserted) = (0usize, 0usize, 0usize);

    let flush_changes = |ops: &mut Vec<Op>, deleted: &mut usize, inserted: &mut usize| {
        match (*deleted, *inserted) {
            (0, 0) => {}
            (d, 0) => ops.push(Op::Delete(d)),
            (0, n) => ops.push(Op::Insert(n)),
            (d, n) => ops.push(Op::Replace(d, n)),
        }
        *deleted = 0;
        *inserted = 0;
    };

    for step in steps(a, b) {
        match step {
            Step::Equal => {
                flush_changes(&mut ops, &mut deleted, &mut inserted);
                equal += 1;
            }
            Step::Delete | Step::Insert => {
                if equal > 0 {
                    ops.push(Op::Equal(equal));
                    equal = 0;
                }
                if step == Step::Delete {
                    deleted += 1;
                } else {
                    inserted += 1;
                }
            }
        }
    }
    if equal > 0 {
        ops.push(Op::Equal(equal));
    }
    flush_changes(&mut ops, &mut deleted, &mut inserted);
    ops
}

/// Similarity of two strings: 2 * matched / total characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = lcs_table(&a, &b)[0][0];
    2.0 * matched as f64 / total as f64
}

/// Guide lines for an edited pair: (guide under `a`, guide under `b`).
fn guides(a: &str, b: &str) -> (String, String) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut ga = String::with_capacity(a.len());
    let mut gb = String::with_capacity(b.len());
    for op in opcodes(&a, &b) {
        match op {
            Op::Equal(n) => {
                ga.extend(std::iter::repeat(' ').take(n));
                gb.extend(std::iter::repeat(' ').take(n));
            }
            Op::Delete(n) => ga.extend(std::iter::repeat('-').take(n)),
            Op::Insert(n) => gb.extend(std::iter::repeat('+').take(n)),
            Op::Replace(d, n) => {
                ga.extend(std::iter::repeat('^').take(d));
                gb.extend(std::iter::repeat('^').take(n));
            }
        }
    }
    (ga.trim_end().to_string(), gb.trim_end().to_string())
}

fn push_line(out: &mut Vec<String>, prefix: &str, text: &str) {
    out.push(format!("{prefix}{text}"));
}

fn push_guide(out: &mut Vec<String>, guide: &str) {
    if !guide.is_empty() {
        out.push(format!("? {guide}"));
    }
}

fn render_replace(out: &mut Vec<String>, removed: &[&str], added: &[&str]) {
    let paired = removed.len().min(added.len());
    for k in 0..paired {
        let (a, b) = (removed[k], added[k]);
        if similarity(a, b) >= PAIR_CUTOFF {
            let (ga, gb) = guides(a, b);
            push_line(out, "- ", a);
            push_guide(out, &ga);
            push_line(out, "+ ", b);
            push_guide(out, &gb);
        } else {
            push_line(out, "- ", a);
            push_line(out, "+ ", b);
        }
    }
    for a in &removed[paired..] {
        push_line(out, "- ", a);
    }
    for b in &added[paired..] {
        push_line(out, "+ ", b);
    }
}

/// Diff `expected` against `actual`. Returns `None` when the texts are identical.
pub fn render(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    let a: Vec<&str> = expected.lines().collect();
    let b: Vec<&str> = actual.lines().collect();
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);

    for op in opcodes(&a, &b) {
        match op {
            Op::Equal(n) => {
                for line in &a[i..i + n] {
                    push_line(&mut out, "  ", line);
                }
                i += n;
                j += n;
            }
            Op::Delete(n) => {
                for line in &a[i..i + n] {
                    push_line(&mut out, "- ", line);
                }
                i += n;
            }
            Op::Insert(n) => {
                for line in &b[j..j + n] {
                    push_line(&mut out, "+ ", line);
                }
                j += n;
            }
            Op::Replace(d, n) => {
                render_replace(&mut out, &a[i..i + d], &b[j..j + n]);
                i += d;
                j += n;
            }
        }
    }

    Some(out.join("\n"))
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
