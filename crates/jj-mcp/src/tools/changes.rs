//! Tools that create, rewrite or move changes

use jj_exec::JjArgs;

use super::ToolSpec;
use crate::params::{ParamKind, ParamSpec, Params};

const MESSAGE: ParamSpec =
    ParamSpec::optional("message", ParamKind::Text, "Description for the change (-m)");

const PATHS: ParamSpec =
    ParamSpec::optional("paths", ParamKind::StrList, "Only affect these paths");

pub(crate) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "jj_new",
        description: "Create a new, empty change and (unless `no_edit`) make it the working \
                      copy. With no revisions it is created on top of the working copy; with \
                      several it becomes a merge.",
        params: &[
            MESSAGE,
            ParamSpec::optional("no_edit", ParamKind::Bool, "Do not edit the new change"),
            ParamSpec::optional(
                "insert_after",
                ParamKind::StrList,
                "Insert the new change after these revisions (-A)",
            ),
            ParamSpec::optional(
                "insert_before",
                ParamKind::StrList,
                "Insert the new change before these revisions (-B)",
            ),
            ParamSpec::optional("revisions", ParamKind::StrList, "Parent revisions"),
        ],
        conflicts: &[("revisions", "insert_after"), ("revisions", "insert_before")],
        build: new,
    },
    ToolSpec {
        name: "jj_describe",
        description: "Set the description of a change (default: the working copy).",
        params: &[
            ParamSpec::required("message", ParamKind::Text, "New description (-m)"),
            ParamSpec::optional("revisions", ParamKind::StrList, "Changes to describe"),
        ],
        conflicts: &[],
        build: describe,
    },
    ToolSpec {
        name: "jj_commit",
        description: "Describe the working-copy change and start a new empty change on top of \
                      it. With `paths`, only those paths go into the committed change.",
        params: &[
            ParamSpec::required("message", ParamKind::Text, "Description for the change (-m)"),
            PATHS,
        ],
        conflicts: &[],
        build: commit,
    },
    ToolSpec {
        name: "jj_edit",
        description: "Make an existing change the working copy, so that further file edits \
                      amend it directly.",
        params: &[ParamSpec::required("revision", ParamKind::Str, "Change to edit")],
        conflicts: &[],
        build: edit,
    },
    ToolSpec {
        name: "jj_abandon",
        description: "Abandon changes (default: the working copy). Their descendants are \
                      rebased onto their parents.",
        params: &[ParamSpec::optional("revisions", ParamKind::StrList, "Changes to abandon")],
        conflicts: &[],
        build: abandon,
    },
    ToolSpec {
        name: "jj_squash",
        description: "Move changes from a revision into another. By default moves the working \
                      copy into its parent; use `revision`, or `from`/`into`, to choose. Pass \
                      `message` or `use_destination_message` to avoid an editor when both \
                      sides have descriptions.",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Squash this revision into its parent (-r)"),
            ParamSpec::optional("from", ParamKind::Str, "Revision to take changes from"),
            ParamSpec::optional("into", ParamKind::Str, "Revision to move changes into"),
            MESSAGE,
            ParamSpec::optional(
                "use_destination_message",
                ParamKind::Bool,
                "Keep the destination's description",
            ),
            ParamSpec::optional(
                "keep_emptied",
                ParamKind::Bool,
                "Do not abandon the source if it becomes empty",
            ),
            PATHS,
        ],
        conflicts: &[
            ("revision", "from"),
            ("revision", "into"),
            ("message", "use_destination_message"),
        ],
        build: squash,
    },
    ToolSpec {
        name: "jj_split",
        description: "Split a revision (default: the working copy) in two: the listed paths go \
                      into the first change, everything else stays in the second.",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to split (-r)"),
            ParamSpec::optional("message", ParamKind::Text, "Description for the first change (-m)"),
            ParamSpec::required("paths", ParamKind::StrList, "Paths to put in the first change"),
        ],
        conflicts: &[],
        build: split,
    },
    ToolSpec {
        name: "jj_rebase",
        description: "Move revisions to a different parent. Choose what to move with one of \
                      `source` (a revision and its descendants), `branch` (a whole branch \
                      relative to the destination) or `revisions` (only those revisions); \
                      jj defaults to `branch` of the working copy.",
        params: &[
            ParamSpec::optional("source", ParamKind::Str, "Rebase this revision and its descendants"),
            ParamSpec::optional("branch", ParamKind::Str, "Rebase the whole branch containing this revision"),
            ParamSpec::optional("revisions", ParamKind::StrList, "Rebase only these revisions"),
            ParamSpec::required("destination", ParamKind::Str, "New parent revision"),
            ParamSpec::optional(
                "skip_emptied",
                ParamKind::Bool,
                "Abandon revisions that become empty",
            ),
        ],
        conflicts: &[
            ("source", "branch"),
            ("source", "revisions"),
            ("branch", "revisions"),
        ],
        build: rebase,
    },
    ToolSpec {
        name: "jj_restore",
        description: "Restore paths from another revision. With no arguments, discards all \
                      changes in the working copy.",
        params: &[
            ParamSpec::optional("from", ParamKind::Str, "Revision to restore from"),
            ParamSpec::optional("into", ParamKind::Str, "Revision to restore into"),
            ParamSpec::optional(
                "changes_in",
                ParamKind::Str,
                "Undo the changes made in this revision",
            ),
            PATHS,
        ],
        conflicts: &[("changes_in", "from"), ("changes_in", "into")],
        build: restore,
    },
    ToolSpec {
        name: "jj_duplicate",
        description: "Create copies of revisions (default: the working copy), optionally onto a \
                      different parent.",
        params: &[
            ParamSpec::optional("destination", ParamKind::Str, "Parent for the copies"),
            ParamSpec::optional("revisions", ParamKind::StrList, "Revisions to duplicate"),
        ],
        conflicts: &[],
        build: duplicate,
    },
    ToolSpec {
        name: "jj_next",
        description: "Move the working copy to a child change, `offset` generations forward.",
        params: &[
            ParamSpec::optional("offset", ParamKind::PositiveInt, "How many generations to move"),
            ParamSpec::optional("edit", ParamKind::Bool, "Edit the target instead of creating a new change on it"),
            ParamSpec::optional("conflict", ParamKind::Bool, "Jump to the next conflicted change"),
        ],
        conflicts: &[("offset", "conflict")],
        build: next,
    },
    ToolSpec {
        name: "jj_prev",
        description: "Move the working copy to a parent change, `offset` generations back.",
        params: &[
            ParamSpec::optional("offset", ParamKind::PositiveInt, "How many generations to move"),
            ParamSpec::optional("edit", ParamKind::Bool, "Edit the target instead of creating a new change on it"),
            ParamSpec::optional("conflict", ParamKind::Bool, "Jump to the previous conflicted change"),
        ],
        conflicts: &[("offset", "conflict")],
        build: prev,
    },
];

fn new(p: &Params) -> JjArgs {
    JjArgs::new(&["new"])
        .opt("-m", p.str("message"))
        .flag("--no-edit", p.flag("no_edit"))
        .opt_each("-A", p.list("insert_after"))
        .opt_each("-B", p.list("insert_before"))
        .positionals(p.list("revisions"))
}

fn describe(p: &Params) -> JjArgs {
    JjArgs::new(&["describe"])
        .opt("-m", p.str("message"))
        .positionals(p.list("revisions"))
}

fn commit(p: &Params) -> JjArgs {
    JjArgs::new(&["commit"])
        .opt("-m", p.str("message"))
        .positionals(p.list("paths"))
}

fn edit(p: &Params) -> JjArgs {
    JjArgs::new(&["edit"]).positional(p.str("revision"))
}

fn abandon(p: &Params) -> JjArgs {
    JjArgs::new(&["abandon"]).positionals(p.list("revisions"))
}

fn squash(p: &Params) -> JjArgs {
    JjArgs::new(&["squash"])
        .opt("-r", p.str("revision"))
        .opt("--from", p.str("from"))
        .opt("--into", p.str("into"))
        .opt("-m", p.str("message"))
        .flag("--use-destination-message", p.flag("use_destination_message"))
        .flag("--keep-emptied", p.flag("keep_emptied"))
        .positionals(p.list("paths"))
}

fn split(p: &Params) -> JjArgs {
    JjArgs::new(&["split"])
        .opt("-r", p.str("revision"))
        .opt("-m", p.str("message"))
        .positionals(p.list("paths"))
}

fn rebase(p: &Params) -> JjArgs {
    JjArgs::new(&["rebase"])
        .opt("--source", p.str("source"))
        .opt("--branch", p.str("branch"))
        .opt_each("--revisions", p.list("revisions"))
        .opt("--destination", p.str("destination"))
        .flag("--skip-emptied", p.flag("skip_emptied"))
}

fn restore(p: &Params) -> JjArgs {
    JjArgs::new(&["restore"])
        .opt("--from", p.str("from"))
        .opt("--into", p.str("into"))
        .opt("--changes-in", p.str("changes_in"))
        .positionals(p.list("paths"))
}

fn duplicate(p: &Params) -> JjArgs {
    JjArgs::new(&["duplicate"])
        .opt("--destination", p.str("destination"))
        .positionals(p.list("revisions"))
}

fn next(p: &Params) -> JjArgs {
    navigate("next", p)
}

fn prev(p: &Params) -> JjArgs {
    navigate("prev", p)
}

fn navigate(direction: &str, p: &Params) -> JjArgs {
    JjArgs::new(&[direction])
        .flag("--edit", p.flag("edit"))
        .flag("--conflict", p.flag("conflict"))
        .positional(p.int("offset"))
}

#[cfg(test)]
mod tests {
    use crate::tools::test_support::{build, reject};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::new_bare("jj_new", json!({}), &["new"])]
    #[case::new_merge("jj_new", json!({"revisions": ["a", "b"], "message": "merge"}), &["new", "-m", "merge", "a", "b"])]
    #[case::new_insert(
        "jj_new",
        json!({"insert_after": ["x"], "insert_before": ["y", "z"], "no_edit": true}),
        &["new", "--no-edit", "-A", "x", "-B", "y", "-B", "z"]
    )]
    #[case::describe("jj_describe", json!({"message": "fix: typo"}), &["describe", "-m", "fix: typo"])]
    #[case::describe_clear("jj_describe", json!({"message": "", "revisions": ["@-"]}), &["describe", "-m", "", "@-"])]
    #[case::commit("jj_commit", json!({"message": "wip", "paths": ["src"]}), &["commit", "-m", "wip", "src"])]
    #[case::edit("jj_edit", json!({"revision": "kxryzmor"}), &["edit", "kxryzmor"])]
    #[case::abandon_bare("jj_abandon", json!({}), &["abandon"])]
    #[case::abandon_many("jj_abandon", json!({"revisions": ["a", "b", "c"]}), &["abandon", "a", "b", "c"])]
    #[case::squash_bare("jj_squash", json!({}), &["squash"])]
    #[case::squash_range(
        "jj_squash",
        json!({"from": "@", "into": "main", "use_destination_message": true, "paths": ["f"]}),
        &["squash", "--from", "@", "--into", "main", "--use-destination-message", "f"]
    )]
    #[case::squash_rev(
        "jj_squash",
        json!({"revision": "x", "message": "m", "keep_emptied": true}),
        &["squash", "-r", "x", "-m", "m", "--keep-emptied"]
    )]
    #[case::split("jj_split", json!({"paths": ["a.rs"], "message": "part 1"}), &["split", "-m", "part 1", "a.rs"])]
    #[case::rebase_source(
        "jj_rebase",
        json!({"source": "@-", "destination": "main"}),
        &["rebase", "--source", "@-", "--destination", "main"]
    )]
    #[case::rebase_branch(
        "jj_rebase",
        json!({"branch": "@", "destination": "trunk()", "skip_emptied": true}),
        &["rebase", "--branch", "@", "--destination", "trunk()", "--skip-emptied"]
    )]
    #[case::rebase_revisions(
        "jj_rebase",
        json!({"revisions": ["a", "b"], "destination": "c"}),
        &["rebase", "--revisions", "a", "--revisions", "b", "--destination", "c"]
    )]
    #[case::rebase_default("jj_rebase", json!({"destination": "main"}), &["rebase", "--destination", "main"])]
    #[case::restore_bare("jj_restore", json!({}), &["restore"])]
    #[case::restore_from("jj_restore", json!({"from": "@--", "paths": ["x"]}), &["restore", "--from", "@--", "x"])]
    #[case::restore_changes_in("jj_restore", json!({"changes_in": "abc"}), &["restore", "--changes-in", "abc"])]
    #[case::duplicate("jj_duplicate", json!({"revisions": ["a"], "destination": "b"}), &["duplicate", "--destination", "b", "a"])]
    #[case::next_bare("jj_next", json!({}), &["next"])]
    #[case::next_offset("jj_next", json!({"offset": 2, "edit": true}), &["next", "--edit", "2"])]
    #[case::prev_conflict("jj_prev", json!({"conflict": true}), &["prev", "--conflict"])]
    fn test_builds(#[case] tool: &str, #[case] args: Value, #[case] expected: &[&str]) {
        assert_eq!(build(tool, args), expected);
    }

    #[test]
    fn test_rebase_selectors_are_exclusive() {
        assert_eq!(
            reject("jj_rebase", json!({"source": "a", "branch": "b", "destination": "c"})),
            "parameters `source` and `branch` cannot be used together"
        );
        assert_eq!(
            reject("jj_rebase", json!({"branch": "b", "revisions": ["r"], "destination": "c"})),
            "parameters `branch` and `revisions` cannot be used together"
        );
    }

    #[test]
    fn test_rebase_requires_destination() {
        assert_eq!(
            reject("jj_rebase", json!({"source": "@-"})),
            "missing required parameter `destination`"
        );
    }

    #[test]
    fn test_describe_requires_message() {
        assert_eq!(
            reject("jj_describe", json!({})),
            "missing required parameter `message`"
        );
    }

    #[test]
    fn test_split_requires_paths() {
        assert_eq!(
            reject("jj_split", json!({"paths": []})),
            "missing required parameter `paths`"
        );
    }

    #[test]
    fn test_edit_rejects_empty_revision() {
        assert_eq!(
            reject("jj_edit", json!({"revision": ""})),
            "parameter `revision` must be a non-empty string"
        );
    }

    #[test]
    fn test_dash_leading_path_is_separated() {
        assert_eq!(
            build("jj_commit", json!({"message": "m", "paths": ["-odd"]})),
            vec!["commit", "-m", "m", "--", "-odd"]
        );
    }

    #[test]
    fn test_repository_override_precedes_positionals() {
        assert_eq!(
            build("jj_abandon", json!({"revisions": ["x"], "repository": "../other"})),
            vec!["abandon", "-R", "../other", "x"]
        );
    }
}
