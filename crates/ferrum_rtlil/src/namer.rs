//! Unique identifiers within one RTLIL scope.

use std::collections::HashSet;

/// Hands out names that are unique within the scope owning the namer.
///
/// Names starting with `\` are public; names starting with `$` are
/// generated. A shared counter numbers anonymous names and disambiguates
/// collisions, so it only ever grows.
#[derive(Debug, Default)]
pub struct Namer {
    index: u32,
    names: HashSet<String>,
}

impl Namer {
    /// Creates an empty namer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a name.
    ///
    /// With no requested name the result is `$<n>`. A requested non-local
    /// name without an escape marker gets a `\` prefix. Collisions are
    /// resolved by appending `$<n>` until the name is free.
    pub fn make_name(&mut self, name: Option<&str>, local: bool) -> String {
        let mut name = match name {
            None => {
                self.index += 1;
                format!("${}", self.index)
            }
            Some(name) if !local && !name.starts_with(['\\', '$']) => format!("\\{name}"),
            Some(name) => name.to_string(),
        };
        while self.names.contains(&name) {
            self.index += 1;
            name = format!("{name}${}", self.index);
        }
        self.names.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_names_count_up() {
        let mut n = Namer::new();
        assert_eq!(n.make_name(None, false), "$1");
        assert_eq!(n.make_name(None, true), "$2");
    }

    #[test]
    fn public_names_are_escaped() {
        let mut n = Namer::new();
        assert_eq!(n.make_name(Some("o"), false), "\\o");
        assert_eq!(n.make_name(Some("\\p"), false), "\\p");
        assert_eq!(n.make_name(Some("$q"), false), "$q");
    }

    #[test]
    fn local_names_are_kept_verbatim() {
        let mut n = Namer::new();
        assert_eq!(n.make_name(Some("cell"), true), "cell");
    }

    #[test]
    fn collisions_append_counter() {
        let mut n = Namer::new();
        assert_eq!(n.make_name(Some("x"), false), "\\x");
        assert_eq!(n.make_name(Some("x"), false), "\\x$1");
        assert_eq!(n.make_name(Some("x"), false), "\\x$2");
        assert_eq!(n.make_name(None, false), "$3");
    }

    #[test]
    fn collision_suffixes_accumulate() {
        let mut n = Namer::new();
        n.make_name(Some("$1"), true);
        // `$1` is taken, so the anonymous name retries as `$1$2`.
        assert_eq!(n.make_name(None, true), "$1$2");
    }

    #[test]
    fn separate_namers_reuse_names() {
        let mut a = Namer::new();
        let mut b = Namer::new();
        assert_eq!(a.make_name(Some("clk"), false), "\\clk");
        assert_eq!(b.make_name(Some("clk"), false), "\\clk");
    }
}
