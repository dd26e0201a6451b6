//! Version comparison helpers.
//!
//! Two different notions live here:
//! - [`has_newer_component`] is the cheap dotted-number check behind
//!   `Package::has_updates`; it never validates the version strings.
//! - [`VersionRange`] parses npm/bower style ranges and checks an installed
//!   version against them, on top of the `semver` crate.

use semver::{Version, VersionReq};
use std::sync::LazyLock;

/// `A - B` inclusive ranges.
static HYPHEN_RANGE: LazyLock<Option<regex_lite::Regex>> =
    LazyLock::new(|| regex_lite::Regex::new(r"^(\S+)\s+-\s+(\S+)$").ok());

/// Whether `latest` is newer than `current`, comparing dotted numeric
/// components left to right.
///
/// The first component pair that differs decides. Components are read the way
/// `parseInt` reads them (leading digits only); a pair where either side has no
/// number is skipped. Only indices present in `current` are compared, so extra
/// trailing components in `latest` never count as an update.
pub fn has_newer_component(current: &str, latest: &str) -> bool {
    let latest: Vec<&str> = latest.split('.').collect();

    for (index, value) in current.split('.').enumerate() {
        let current_number = leading_number(value);
        let latest_number = latest.get(index).and_then(|v| leading_number(v));

        let (Some(current_number), Some(latest_number)) = (current_number, latest_number) else {
            continue;
        };

        if latest_number != current_number {
            return latest_number > current_number;
        }
    }

    false
}

/// Parse the leading decimal digits of `value`, ignoring leading whitespace.
fn leading_number(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Parse an installed version, tolerating a leading `v` or `=`.
pub fn parse_version(version: &str) -> Option<Version> {
    let trimmed = version.trim().trim_start_matches('=').trim_start_matches(['v', 'V']);
    Version::parse(trimmed).ok()
}

/// A bower/npm version range: one or more `||`-separated alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range. Returns `None` for anything that is not a valid range,
    /// such as tags (`latest`), URLs or git endpoints.
    pub fn parse(range: &str) -> Option<Self> {
        let alternatives = range
            .split("||")
            .map(parse_alternative)
            .collect::<Option<Vec<_>>>()?;

        Some(Self { alternatives })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

/// Whether `range` is a valid version range.
pub fn is_valid_range(range: &str) -> bool {
    VersionRange::parse(range).is_some()
}

/// Whether `version` satisfies `range`. Invalid input never satisfies.
pub fn satisfies(version: &str, range: &str) -> bool {
    match (parse_version(version), VersionRange::parse(range)) {
        (Some(version), Some(range)) => range.matches(&version),
        _ => false,
    }
}

fn parse_alternative(alternative: &str) -> Option<VersionReq> {
    let alternative = alternative.trim();

    if let Some(re) = HYPHEN_RANGE.as_ref()
        && let Some(caps) = re.captures(alternative)
    {
        let lower = normalize_comparator(&format!(">={}", &caps[1]))?;
        let upper = normalize_comparator(&format!("<={}", &caps[2]))?;
        return VersionReq::parse(&format!("{}, {}", lower, upper)).ok();
    }

    let mut comparators = Vec::new();
    let mut pending_op = String::new();

    for token in alternative.split_whitespace() {
        if token.chars().all(is_operator_char) {
            pending_op.push_str(token);
            continue;
        }
        let token = format!("{}{}", std::mem::take(&mut pending_op), token);
        comparators.push(normalize_comparator(&token)?);
    }

    if !pending_op.is_empty() {
        return None;
    }

    // `*` must stand alone for the semver crate; next to other comparators it
    // adds nothing
    if comparators.len() > 1 {
        comparators.retain(|c| c != "*");
    }

    if comparators.is_empty() {
        return Some(VersionReq::STAR);
    }

    VersionReq::parse(&comparators.join(", ")).ok()
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^')
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Rewrite one npm comparator into `semver` crate syntax.
///
/// A bare version means an exact match in npm, and `x`/`X` wildcards become
/// `*` or a shorter partial version.
fn normalize_comparator(token: &str) -> Option<String> {
    let split = token
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(split);
    let op = if op == "~>" { "~" } else { op };
    let version = version.trim_start_matches(['v', 'V']);

    if version.is_empty() {
        return None;
    }

    let parts: Vec<&str> = version.split('.').collect();
    if parts.iter().any(|p| is_wildcard(p)) {
        let fixed: Vec<&str> = parts
            .iter()
            .take_while(|p| !is_wildcard(p))
            .copied()
            .collect();

        if fixed.is_empty() {
            return Some("*".to_string());
        }
        return Some(if op.is_empty() || op == "=" {
            format!("{}.*", fixed.join("."))
        } else {
            format!("{}{}", op, fixed.join("."))
        });
    }

    let op = if op.is_empty() { "=" } else { op };
    Some(format!("{}{}", op, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_minor() {
        assert!(has_newer_component("1.2.0", "1.3.0"));
    }

    #[test]
    fn test_equal_versions() {
        assert!(!has_newer_component("1.2.0", "1.2.0"));
    }

    #[test]
    fn test_older_latest_with_larger_minor() {
        assert!(!has_newer_component("2.0.0", "1.9.9"));
    }

    #[test]
    fn test_newer_patch() {
        assert!(has_newer_component("1.2.3", "1.2.10"));
    }

    #[test]
    fn test_trailing_latest_components_are_ignored() {
        assert!(!has_newer_component("1.2", "1.2.1"));
    }

    #[test]
    fn test_missing_latest_components_never_update() {
        assert!(!has_newer_component("1.2.0", "1.2"));
    }

    #[test]
    fn test_non_numeric_components_are_skipped() {
        assert!(has_newer_component("1.x.0", "1.5.1"));
        assert!(!has_newer_component("v1.0.0", "v2.0.0"));
    }

    #[test]
    fn test_leading_number_reads_like_parse_int() {
        assert_eq!(leading_number("12"), Some(12));
        assert_eq!(leading_number("0-beta"), Some(0));
        assert_eq!(leading_number("beta"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_caret_range() {
        assert!(satisfies("1.2.0", "^1.0.0"));
        assert!(!satisfies("1.2.0", "^2.0.0"));
    }

    #[test]
    fn test_tilde_range() {
        assert!(satisfies("1.2.9", "~1.2.0"));
        assert!(!satisfies("1.3.0", "~1.2.0"));
        assert!(satisfies("1.2.9", "~>1.2.0"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(satisfies("1.2.3", "1.2.3"));
        assert!(!satisfies("1.2.4", "1.2.3"));
        assert!(satisfies("1.2.4", "1.2"));
    }

    #[test]
    fn test_wildcards() {
        assert!(satisfies("1.9.0", "1.x"));
        assert!(satisfies("1.2.7", "1.2.X"));
        assert!(!satisfies("2.0.0", "1.x"));
        assert!(satisfies("3.1.4", "*"));
        assert!(satisfies("3.1.4", ""));
        assert!(satisfies("1.5.0", ">=1.x"));
    }

    #[test]
    fn test_space_separated_comparators() {
        assert!(satisfies("1.5.0", ">=1.0.0 <2.0.0"));
        assert!(!satisfies("2.0.0", ">=1.0.0 <2.0.0"));
        assert!(satisfies("1.5.0", ">= 1.0.0 < 2.0.0"));
    }

    #[test]
    fn test_hyphen_range() {
        assert!(satisfies("1.0.0", "1.0.0 - 1.5.0"));
        assert!(satisfies("1.5.0", "1.0.0 - 1.5.0"));
        assert!(!satisfies("1.5.1", "1.0.0 - 1.5.0"));
    }

    #[test]
    fn test_alternatives() {
        assert!(satisfies("2.3.0", "^1.0.0 || ^2.0.0"));
        assert!(!satisfies("3.0.0", "^1.0.0 || ^2.0.0"));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(!is_valid_range("latest"));
        assert!(!is_valid_range("git://github.com/user/repo.git"));
        assert!(!is_valid_range(">="));
        assert!(is_valid_range("~2.1.0"));
    }

    #[test]
    fn test_parse_version_prefixes() {
        assert_eq!(parse_version("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("=1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("1.2"), None);
    }
}
