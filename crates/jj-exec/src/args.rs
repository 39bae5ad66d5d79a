//! Argument construction for `jj`
//!
//! Tokens are kept in three groups and joined as
//! `<subcommand path> <options> [--] <positionals>`, so callers may add options
//! and positionals in any order without breaking the program's grammar.
//! Absent optional values produce no tokens at all.

/// Ordered command-line tokens for a single `jj` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JjArgs {
    command: Vec<String>,
    options: Vec<String>,
    positionals: Vec<String>,
}

impl JjArgs {
    /// Start from a fixed subcommand path, e.g. `&["bookmark", "create"]`
    pub fn new(command: &[&str]) -> Self {
        Self {
            command: command.iter().map(|s| s.to_string()).collect(),
            options: Vec::new(),
            positionals: Vec::new(),
        }
    }

    /// A switch that takes no value, emitted only when `enabled`
    pub fn flag(mut self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.options.push(name.to_string());
        }
        self
    }

    /// A single-valued option, emitted only when a value is present
    pub fn opt<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.options.push(name.to_string());
            self.options.push(value.to_string());
        }
        self
    }

    /// A single-valued option repeated once per value: `-r a -r b`
    pub fn opt_each<V: AsRef<str>>(mut self, name: &str, values: &[V]) -> Self {
        for value in values {
            self.options.push(name.to_string());
            self.options.push(value.as_ref().to_string());
        }
        self
    }

    /// An option with a variadic tail: `--from a b c`
    pub fn opt_variadic<V: AsRef<str>>(mut self, name: &str, values: &[V]) -> Self {
        if !values.is_empty() {
            self.options.push(name.to_string());
            self.options
                .extend(values.iter().map(|v| v.as_ref().to_string()));
        }
        self
    }

    /// A trailing positional argument, emitted only when present
    pub fn positional<V: ToString>(mut self, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.positionals.push(value.to_string());
        }
        self
    }

    /// Trailing positional arguments in input order
    pub fn positionals<V: AsRef<str>>(mut self, values: &[V]) -> Self {
        self.positionals
            .extend(values.iter().map(|v| v.as_ref().to_string()));
        self
    }

    /// Select an alternate repository (`-R <path>`)
    pub fn repository(self, path: Option<&str>) -> Self {
        self.opt("-R", path)
    }

    /// The subcommand path this invocation starts with
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Flatten into the final token list
    ///
    /// A `--` separator is inserted before the positionals when one of them
    /// starts with `-`, so a path or revision can never be read as a flag.
    pub fn into_vec(self) -> Vec<String> {
        let needs_separator = self.positionals.iter().any(|p| p.starts_with('-'));
        let mut tokens = self.command;
        tokens.extend(self.options);
        if needs_separator {
            tokens.push("--".to_string());
        }
        tokens.extend(self.positionals);
        tokens
    }
}

impl From<JjArgs> for Vec<String> {
    fn from(args: JjArgs) -> Self {
        args.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tokens(args: JjArgs) -> Vec<String> {
        args.into_vec()
    }

    #[rstest]
    #[case::single(&["status"])]
    #[case::nested(&["git", "remote", "list"])]
    #[case::operation(&["operation", "log"])]
    fn subcommand_only(#[case] command: &[&str]) {
        assert_eq!(tokens(JjArgs::new(command)), command.to_vec());
    }

    #[test]
    fn absent_values_emit_nothing() {
        let args = JjArgs::new(&["log"])
            .flag("--no-graph", false)
            .opt::<&str>("-r", None)
            .opt_each::<&str>("-r", &[])
            .opt_variadic::<&str>("--from", &[])
            .positional::<&str>(None)
            .positionals::<&str>(&[])
            .repository(None);
        assert_eq!(tokens(args), vec!["log"]);
    }

    #[test]
    fn options_come_before_positionals_regardless_of_call_order() {
        let args = JjArgs::new(&["bookmark", "create"])
            .positional(Some("feature-x"))
            .opt("-r", Some("@-"));
        assert_eq!(tokens(args), vec!["bookmark", "create", "-r", "@-", "feature-x"]);
    }

    #[test]
    fn repeated_and_variadic_options() {
        let args = JjArgs::new(&["bookmark", "move"])
            .opt_each("--from", &["a", "b"])
            .opt_variadic("--to", &["c", "d"]);
        assert_eq!(
            tokens(args),
            vec!["bookmark", "move", "--from", "a", "--from", "b", "--to", "c", "d"]
        );
    }

    #[test]
    fn numeric_option_values() {
        let args = JjArgs::new(&["log"]).opt("-n", Some(5u64));
        assert_eq!(tokens(args), vec!["log", "-n", "5"]);
    }

    #[test]
    fn repository_is_an_option() {
        let args = JjArgs::new(&["status"])
            .positionals(&["src"])
            .repository(Some("/tmp/repo"));
        assert_eq!(tokens(args), vec!["status", "-R", "/tmp/repo", "src"]);
    }

    #[rstest]
    #[case::plain(&["a.txt"], &["file", "show", "a.txt"])]
    #[case::leading_dash(&["-weird-name"], &["file", "show", "--", "-weird-name"])]
    #[case::any_dash(&["a.txt", "-b"], &["file", "show", "--", "a.txt", "-b"])]
    #[case::inner_dash(&["a-b"], &["file", "show", "a-b"])]
    fn separator_before_dash_positionals(#[case] paths: &[&str], #[case] expected: &[&str]) {
        let args = JjArgs::new(&["file", "show"]).positionals(paths);
        assert_eq!(tokens(args), expected.to_vec());
    }

    #[test]
    fn option_values_are_not_separated() {
        let args = JjArgs::new(&["describe"]).opt("-m", Some("- bullet"));
        assert_eq!(tokens(args), vec!["describe", "-m", "- bullet"]);
    }

    #[test]
    fn command_accessor() {
        let args = JjArgs::new(&["operation", "log"]).opt("-n", Some(1));
        assert_eq!(args.command(), &["operation".to_string(), "log".to_string()]);
    }
}
