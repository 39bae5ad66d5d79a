//! Git interop tools: fetch, push, remotes

use jj_exec::JjArgs;

use super::ToolSpec;
use crate::params::{ParamKind, ParamSpec, Params};

pub(crate) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "jj_git_fetch",
        description: "Fetch from Git remotes (default: the configured fetch remotes, usually \
                      `origin`).",
        params: &[
            ParamSpec::optional("remotes", ParamKind::StrList, "Remotes to fetch from"),
            ParamSpec::optional("all_remotes", ParamKind::Bool, "Fetch from every remote"),
            ParamSpec::optional(
                "branches",
                ParamKind::StrList,
                "Only fetch these branches (glob patterns allowed)",
            ),
        ],
        conflicts: &[("remotes", "all_remotes")],
        build: fetch,
    },
    ToolSpec {
        name: "jj_git_push",
        description: "Push bookmarks to a Git remote. By default pushes tracked bookmarks that \
                      point into the working copy's ancestry; use `changes` to create \
                      bookmarks for changes on the fly. Set `dry_run` to see what would \
                      happen.",
        params: &[
            ParamSpec::optional("remote", ParamKind::Str, "Remote to push to"),
            ParamSpec::optional("bookmarks", ParamKind::StrList, "Bookmarks to push"),
            ParamSpec::optional(
                "changes",
                ParamKind::StrList,
                "Push these changes by creating a bookmark for each",
            ),
            ParamSpec::optional("all", ParamKind::Bool, "Push all bookmarks"),
            ParamSpec::optional("tracked", ParamKind::Bool, "Push all tracked bookmarks"),
            ParamSpec::optional("deleted", ParamKind::Bool, "Push all deleted bookmarks"),
            ParamSpec::optional("allow_new", ParamKind::Bool, "Allow pushing new bookmarks"),
            ParamSpec::optional("dry_run", ParamKind::Bool, "Only report what would be pushed"),
        ],
        conflicts: &[("all", "tracked"), ("all", "bookmarks"), ("tracked", "bookmarks")],
        build: push,
    },
    ToolSpec {
        name: "jj_git_remote_list",
        description: "List the Git remotes of the repository and their URLs.",
        params: &[],
        conflicts: &[],
        build: remote_list,
    },
    ToolSpec {
        name: "jj_git_init",
        description: "Create a new Git-backed jj repository, optionally colocated with a Git \
                      working tree.",
        params: &[
            ParamSpec::optional("colocate", ParamKind::Bool, "Colocate with a .git directory"),
            ParamSpec::optional(
                "destination",
                ParamKind::Str,
                "Directory to create the repository in (default: current directory)",
            ),
        ],
        conflicts: &[],
        build: init,
    },
];

fn fetch(p: &Params) -> JjArgs {
    JjArgs::new(&["git", "fetch"])
        .opt_each("--remote", p.list("remotes"))
        .flag("--all-remotes", p.flag("all_remotes"))
        .opt_each("--branch", p.list("branches"))
}

fn push(p: &Params) -> JjArgs {
    JjArgs::new(&["git", "push"])
        .opt("--remote", p.str("remote"))
        .opt_each("--bookmark", p.list("bookmarks"))
        .opt_each("--change", p.list("changes"))
        .flag("--all", p.flag("all"))
        .flag("--tracked", p.flag("tracked"))
        .flag("--deleted", p.flag("deleted"))
        .flag("--allow-new", p.flag("allow_new"))
        .flag("--dry-run", p.flag("dry_run"))
}

fn remote_list(_: &Params) -> JjArgs {
    JjArgs::new(&["git", "remote", "list"])
}

fn init(p: &Params) -> JjArgs {
    JjArgs::new(&["git", "init"])
        .flag("--colocate", p.flag("colocate"))
        .positional(p.str("destination"))
}
