//! Read-only inspection tools: status, log, diffs and file contents

use jj_exec::JjArgs;

use super::{DIFF_FORMATS, ToolSpec, diff_format};
use crate::params::{ParamKind, ParamSpec, Params};

const PATHS: ParamSpec = ParamSpec::optional(
    "paths",
    ParamKind::StrList,
    "Restrict to these paths (jj fileset syntax)",
);

pub(crate) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "jj_status",
        description: "Show the working-copy change, its parent, and which files are modified, \
                      added or removed. Also reports conflicts and the current bookmarks.",
        params: &[PATHS],
        conflicts: &[],
        build: status,
    },
    ToolSpec {
        name: "jj_log",
        description: "Show the revision history as a graph. Defaults to jj's configured log \
                      revset; pass a revset in `revisions` to choose which changes to show.",
        params: &[
            ParamSpec::optional("revisions", ParamKind::Str, "Revset of changes to show (-r)"),
            ParamSpec::optional("limit", ParamKind::PositiveInt, "Maximum number of changes (-n)"),
            ParamSpec::optional("template", ParamKind::Str, "Template for each change (-T)"),
            ParamSpec::optional("no_graph", ParamKind::Bool, "Print a flat list instead of a graph"),
            ParamSpec::optional("reversed", ParamKind::Bool, "Show oldest changes first"),
            PATHS,
        ],
        conflicts: &[],
        build: log,
    },
    ToolSpec {
        name: "jj_diff",
        description: "Show changes in a revision (default: the working copy), or between two \
                      revisions with `from`/`to`.",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to show the changes of (-r)"),
            ParamSpec::optional("from", ParamKind::Str, "Show changes from this revision"),
            ParamSpec::optional("to", ParamKind::Str, "Show changes to this revision"),
            ParamSpec::optional("format", ParamKind::OneOf(DIFF_FORMATS), "Output format"),
            ParamSpec::optional(
                "context",
                ParamKind::NonNegativeInt,
                "Number of context lines around each change",
            ),
            PATHS,
        ],
        conflicts: &[("revision", "from"), ("revision", "to")],
        build: diff,
    },
    ToolSpec {
        name: "jj_show",
        description: "Show the description and changes of a single revision (default: the \
                      working copy).",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to show"),
            ParamSpec::optional("format", ParamKind::OneOf(DIFF_FORMATS), "Diff output format"),
        ],
        conflicts: &[],
        build: show,
    },
    ToolSpec {
        name: "jj_evolog",
        description: "Show how a change has evolved over time: every previous version of it \
                      recorded in the operation log.",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Change to inspect (-r)"),
            ParamSpec::optional("limit", ParamKind::PositiveInt, "Maximum number of entries (-n)"),
        ],
        conflicts: &[],
        build: evolog,
    },
    ToolSpec {
        name: "jj_file_list",
        description: "List the files tracked in a revision (default: the working copy).",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to list files of (-r)"),
            PATHS,
        ],
        conflicts: &[],
        build: file_list,
    },
    ToolSpec {
        name: "jj_file_show",
        description: "Print the contents of a file as of a revision (default: the working copy).",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to read from (-r)"),
            ParamSpec::required("path", ParamKind::Str, "File to print"),
        ],
        conflicts: &[],
        build: file_show,
    },
    ToolSpec {
        name: "jj_file_annotate",
        description: "Show, for each line of a file, the change that last modified it.",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to annotate at (-r)"),
            ParamSpec::required("path", ParamKind::Str, "File to annotate"),
        ],
        conflicts: &[],
        build: file_annotate,
    },
    ToolSpec {
        name: "jj_resolve_list",
        description: "List files with unresolved conflicts in a revision (default: the working \
                      copy).",
        params: &[
            ParamSpec::optional("revision", ParamKind::Str, "Revision to check (-r)"),
            PATHS,
        ],
        conflicts: &[],
        build: resolve_list,
    },
    ToolSpec {
        name: "jj_workspace_list",
        description: "List the workspaces of the repository and their working-copy changes.",
        params: &[],
        conflicts: &[],
        build: workspace_list,
    },
];

fn status(p: &Params) -> JjArgs {
    JjArgs::new(&["status"]).positionals(p.list("paths"))
}

fn log(p: &Params) -> JjArgs {
    JjArgs::new(&["log"])
        .opt("-r", p.str("revisions"))
        .opt("-n", p.int("limit"))
        .opt("-T", p.str("template"))
        .flag("--no-graph", p.flag("no_graph"))
        .flag("--reversed", p.flag("reversed"))
        .positionals(p.list("paths"))
}

fn diff(p: &Params) -> JjArgs {
    let args = JjArgs::new(&["diff"])
        .opt("-r", p.str("revision"))
        .opt("--from", p.str("from"))
        .opt("--to", p.str("to"));
    diff_format(args, p)
        .opt("--context", p.int("context"))
        .positionals(p.list("paths"))
}

fn show(p: &Params) -> JjArgs {
    diff_format(JjArgs::new(&["show"]), p).positional(p.str("revision"))
}

fn evolog(p: &Params) -> JjArgs {
    JjArgs::new(&["evolog"])
        .opt("-r", p.str("revision"))
        .opt("-n", p.int("limit"))
}

fn file_list(p: &Params) -> JjArgs {
    JjArgs::new(&["file", "list"])
        .opt("-r", p.str("revision"))
        .positionals(p.list("paths"))
}

fn file_show(p: &Params) -> JjArgs {
    JjArgs::new(&["file", "show"])
        .opt("-r", p.str("revision"))
        .positional(p.str("path"))
}

fn file_annotate(p: &Params) -> JjArgs {
    JjArgs::new(&["file", "annotate"])
        .opt("-r", p.str("revision"))
        .positional(p.str("path"))
}

fn resolve_list(p: &Params) -> JjArgs {
    JjArgs::new(&["resolve", "--list"])
        .opt("-r", p.str("revision"))
        .positionals(p.list("paths"))
}

fn workspace_list(_: &Params) -> JjArgs {
    JjArgs::new(&["workspace", "list"])
}
