use once_cell::sync::Lazy;
use regex::Regex;

/// One or more words, then a word and a parenthesised argument list opening a
/// block on the same line.
static METHOD_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*\w+\s+)+\w+\s*\([^\)]*\)\s*\{").unwrap());

pub const TEST_MARKER: &str = "@Test";
const PACKAGE_PREFIX: &str = "package ";
const TEST_DECLARATION_PREFIX: &str = "public void";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRule {
    /// `public void` declarations following a line carrying [`TEST_MARKER`].
    TestMarked,
    /// Any single-line signature matching [`METHOD_SIGNATURE`].
    Signature,
}

/// Scan state for a single file. Nothing survives from one file to the next.
#[derive(Debug, Default)]
struct FileScan {
    package: String,
    inside_block: bool,
}

impl FileScan {
    fn qualify(&self, class_name: &str, method_name: &str) -> String {
        if self.package.is_empty() {
            format!("{class_name}.{method_name}")
        } else {
            format!("{}.{class_name}.{method_name}", self.package)
        }
    }
}

/// Qualified method identifiers found in `source`, in line order.
///
/// This is a line-oriented approximation, not a parser. Known misses and
/// spurious hits:
/// - the block flag drops at the first line starting with `}`, which may
///   close an inner block rather than the method;
/// - signatures spanning several lines are never matched;
/// - the name is the third whitespace-separated token, so `void run() {`
///   yields `{` and `public static void main(..)` yields `void`.
pub fn scan_methods(source: &str, class_name: &str, rule: MethodRule) -> Vec<String> {
    let mut state = FileScan::default();
    let mut out: Vec<String> = vec![];
    for line in source.lines() {
        match rule {
            MethodRule::TestMarked => scan_test_line(&mut state, line, class_name, &mut out),
            MethodRule::Signature => scan_signature_line(&mut state, line, class_name, &mut out),
        }
    }
    out
}

fn scan_test_line(state: &mut FileScan, line: &str, class_name: &str, out: &mut Vec<String>) {
    let trimmed = line.trim();
    if let Some(package) = package_declaration(trimmed) {
        state.package = package;
    } else if line.contains(TEST_MARKER) {
        state.inside_block = true;
    }

    if state.inside_block && trimmed.starts_with(TEST_DECLARATION_PREFIX) {
        if let Some(name) = third_token_name(trimmed) {
            out.push(state.qualify(class_name, name));
        }
    }

    if state.inside_block && trimmed.starts_with('}') {
        state.inside_block = false;
    }
}

fn scan_signature_line(state: &mut FileScan, line: &str, class_name: &str, out: &mut Vec<String>) {
    let trimmed = line.trim();
    if let Some(package) = package_declaration(trimmed) {
        state.package = package;
    }

    if METHOD_SIGNATURE.is_match(line) {
        state.inside_block = true;
        if let Some(name) = third_token_name(trimmed) {
            out.push(state.qualify(class_name, name));
        }
    }

    if state.inside_block && trimmed.starts_with('}') {
        state.inside_block = false;
    }
}

fn package_declaration(trimmed: &str) -> Option<String> {
    trimmed
        .strip_prefix(PACKAGE_PREFIX)
        .map(|rest| rest.replace(';', "").trim().to_string())
}

/// Third whitespace-separated token, cut at its first `(`.
pub fn third_token_name(trimmed: &str) -> Option<&str> {
    let token = trimmed.split_whitespace().nth(2)?;
    token.split('(').next()
}
