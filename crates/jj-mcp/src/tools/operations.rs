//! Operation log tools

use jj_exec::JjArgs;

use super::ToolSpec;
use crate::params::{ParamKind, ParamSpec, Params};

pub(crate) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "jj_op_log",
        description: "Show the operation log: every command that modified the repository, \
                      newest first.",
        params: &[ParamSpec::optional(
            "limit",
            ParamKind::PositiveInt,
            "Maximum number of operations (-n)",
        )],
        conflicts: &[],
        build: op_log,
    },
    ToolSpec {
        name: "jj_op_show",
        description: "Show what an operation changed (default: the latest operation).",
        params: &[ParamSpec::optional("operation", ParamKind::Str, "Operation id")],
        conflicts: &[],
        build: op_show,
    },
    ToolSpec {
        name: "jj_op_restore",
        description: "Restore the whole repository to the state it had at an earlier \
                      operation.",
        params: &[ParamSpec::required("operation", ParamKind::Str, "Operation id to restore to")],
        conflicts: &[],
        build: op_restore,
    },
    ToolSpec {
        name: "jj_undo",
        description: "Undo the most recent operation.",
        params: &[],
        conflicts: &[],
        build: undo,
    },
];

fn op_log(p: &Params) -> JjArgs {
    JjArgs::new(&["operation", "log"]).opt("-n", p.int("limit"))
}

fn op_show(p: &Params) -> JjArgs {
    JjArgs::new(&["operation", "show"]).positional(p.str("operation"))
}

fn op_restore(p: &Params) -> JjArgs {
    JjArgs::new(&["operation", "restore"]).positional(p.str("operation"))
}

fn undo(_: &Params) -> JjArgs {
    JjArgs::new(&["undo"])
}
