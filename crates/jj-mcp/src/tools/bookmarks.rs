//! Bookmark management tools

use jj_exec::JjArgs;

use super::ToolSpec;
use crate::params::{ParamKind, ParamSpec, Params};

const REVISION: ParamSpec =
    ParamSpec::optional("revision", ParamKind::Str, "Target revision (-r, default: @)");

const ALLOW_BACKWARDS: ParamSpec = ParamSpec::optional(
    "allow_backwards",
    ParamKind::Bool,
    "Allow moving the bookmark backwards or sideways",
);

pub(crate) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "jj_bookmark_list",
        description: "List bookmarks and their targets. Remote bookmarks that are not tracked \
                      are only shown with `all_remotes`.",
        params: &[
            ParamSpec::optional("all_remotes", ParamKind::Bool, "Show all remote bookmarks"),
            ParamSpec::optional(
                "revisions",
                ParamKind::StrList,
                "Only show bookmarks pointing into these revsets (-r)",
            ),
            ParamSpec::optional("names", ParamKind::StrList, "Only show these bookmarks"),
        ],
        conflicts: &[],
        build: list,
    },
    ToolSpec {
        name: "jj_bookmark_create",
        description: "Create a new bookmark pointing at a revision (default: the working copy).",
        params: &[
            REVISION,
            ParamSpec::required("name", ParamKind::Str, "Bookmark name"),
        ],
        conflicts: &[],
        build: create,
    },
    ToolSpec {
        name: "jj_bookmark_set",
        description: "Create a bookmark or update an existing one to point at a revision \
                      (default: the working copy).",
        params: &[
            REVISION,
            ALLOW_BACKWARDS,
            ParamSpec::required("name", ParamKind::Str, "Bookmark name"),
        ],
        conflicts: &[],
        build: set,
    },
    ToolSpec {
        name: "jj_bookmark_move",
        description: "Move existing bookmarks to a revision (default: the working copy), \
                      selected by name or by their current target with `from`.",
        params: &[
            ParamSpec::optional(
                "from",
                ParamKind::StrList,
                "Move bookmarks currently pointing at these revisions",
            ),
            ParamSpec::optional("to", ParamKind::Str, "Revision to move to"),
            ALLOW_BACKWARDS,
            ParamSpec::optional("names", ParamKind::StrList, "Bookmarks to move"),
        ],
        conflicts: &[],
        build: move_,
    },
    ToolSpec {
        name: "jj_bookmark_delete",
        description: "Delete bookmarks. The deletion is propagated to remotes on the next push.",
        params: &[ParamSpec::required("names", ParamKind::StrList, "Bookmarks to delete")],
        conflicts: &[],
        build: delete,
    },
    ToolSpec {
        name: "jj_bookmark_forget",
        description: "Forget bookmarks locally without marking them for deletion on remotes.",
        params: &[ParamSpec::required("names", ParamKind::StrList, "Bookmarks to forget")],
        conflicts: &[],
        build: forget,
    },
    ToolSpec {
        name: "jj_bookmark_rename",
        description: "Rename a bookmark.",
        params: &[
            ParamSpec::required("old", ParamKind::Str, "Current bookmark name"),
            ParamSpec::required("new", ParamKind::Str, "New bookmark name"),
        ],
        conflicts: &[],
        build: rename,
    },
    ToolSpec {
        name: "jj_bookmark_track",
        description: "Start tracking remote bookmarks, given as `name@remote`.",
        params: &[ParamSpec::required(
            "names",
            ParamKind::StrList,
            "Remote bookmarks to track (name@remote)",
        )],
        conflicts: &[],
        build: track,
    },
    ToolSpec {
        name: "jj_bookmark_untrack",
        description: "Stop tracking remote bookmarks, given as `name@remote`.",
        params: &[ParamSpec::required(
            "names",
            ParamKind::StrList,
            "Remote bookmarks to untrack (name@remote)",
        )],
        conflicts: &[],
        build: untrack,
    },
];

fn list(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "list"])
        .flag("--all-remotes", p.flag("all_remotes"))
        .opt_each("-r", p.list("revisions"))
        .positionals(p.list("names"))
}

fn create(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "create"])
        .opt("-r", p.str("revision"))
        .positional(p.str("name"))
}

fn set(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "set"])
        .opt("-r", p.str("revision"))
        .flag("--allow-backwards", p.flag("allow_backwards"))
        .positional(p.str("name"))
}

fn move_(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "move"])
        .opt_each("--from", p.list("from"))
        .opt("--to", p.str("to"))
        .flag("--allow-backwards", p.flag("allow_backwards"))
        .positionals(p.list("names"))
}

fn delete(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "delete"]).positionals(p.list("names"))
}

fn forget(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "forget"]).positionals(p.list("names"))
}

fn rename(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "rename"])
        .positional(p.str("old"))
        .positional(p.str("new"))
}

fn track(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "track"]).positionals(p.list("names"))
}

fn untrack(p: &Params) -> JjArgs {
    JjArgs::new(&["bookmark", "untrack"]).positionals(p.list("names"))
}

#[cfg(test)]
mod tests {
    use crate::tools::test_support::{build, reject};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::list_bare("jj_bookmark_list", json!({}), &["bookmark", "list"])]
    #[case::list_filtered(
        "jj_bookmark_list",
        json!({"all_remotes": true, "revisions": ["::@", "main"], "names": ["feat"]}),
        &["bookmark", "list", "--all-remotes", "-r", "::@", "-r", "main", "feat"]
    )]
    #[case::create("jj_bookmark_create", json!({"name": "feature-x"}), &["bookmark", "create", "feature-x"])]
    #[case::create_at(
        "jj_bookmark_create",
        json!({"name": "feature-x", "revision": "@-"}),
        &["bookmark", "create", "-r", "@-", "feature-x"]
    )]
    #[case::set(
        "jj_bookmark_set",
        json!({"name": "main", "revision": "abc", "allow_backwards": true}),
        &["bookmark", "set", "-r", "abc", "--allow-backwards", "main"]
    )]
    #[case::move_from(
        "jj_bookmark_move",
        json!({"from": ["heads(::@- & bookmarks())"], "to": "@-"}),
        &["bookmark", "move", "--from", "heads(::@- & bookmarks())", "--to", "@-"]
    )]
    #[case::move_names("jj_bookmark_move", json!({"names": ["a", "b"], "to": "x"}), &["bookmark", "move", "--to", "x", "a", "b"])]
    #[case::delete("jj_bookmark_delete", json!({"names": ["a", "b"]}), &["bookmark", "delete", "a", "b"])]
    #[case::forget("jj_bookmark_forget", json!({"names": ["old"]}), &["bookmark", "forget", "old"])]
    #[case::rename("jj_bookmark_rename", json!({"old": "a", "new": "b"}), &["bookmark", "rename", "a", "b"])]
    #[case::track("jj_bookmark_track", json!({"names": ["main@origin"]}), &["bookmark", "track", "main@origin"])]
    #[case::untrack("jj_bookmark_untrack", json!({"names": ["main@origin"]}), &["bookmark", "untrack", "main@origin"])]
    fn test_builds(#[case] tool: &str, #[case] args: Value, #[case] expected: &[&str]) {
        assert_eq!(build(tool, args), expected);
    }

    #[test]
    fn test_create_requires_name() {
        assert_eq!(
            reject("jj_bookmark_create", json!({"revision": "@"})),
            "missing required parameter `name`"
        );
    }

    #[test]
    fn test_delete_requires_names() {
        assert_eq!(
            reject("jj_bookmark_delete", json!({})),
            "missing required parameter `names`"
        );
    }

    #[test]
    fn test_rename_rejects_non_string() {
        assert_eq!(
            reject("jj_bookmark_rename", json!({"old": "a", "new": ["b"]})),
            "parameter `new` must be a non-empty string"
        );
    }
}
