use super::types::{ArgKind, ArgSpec, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_SEARCH: [ArgSpec; 1] = [ArgSpec {
    name: "query",
    kind: ArgKind::Text,
    required: true,
}];
const ARGS_GOTO_PAGE: [ArgSpec; 1] = [ArgSpec {
    name: "page",
    kind: ArgKind::Page,
    required: true,
}];
const ARGS_OPEN: [ArgSpec; 1] = [ArgSpec {
    name: "location",
    kind: ArgKind::Text,
    required: true,
}];

const COMMAND_SPECS: [CommandSpec; 11] = [
    CommandSpec {
        id: "search",
        title: "Search",
        args: &ARGS_SEARCH,
    },
    CommandSpec {
        id: "next-page",
        title: "Next Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "prev-page",
        title: "Previous Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "first-page",
        title: "First Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "last-page",
        title: "Last Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "goto-page",
        title: "Go to Page",
        args: &ARGS_GOTO_PAGE,
    },
    CommandSpec {
        id: "clear",
        title: "Clear Search",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "history-back",
        title: "History Back",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "history-forward",
        title: "History Forward",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "open",
        title: "Open Location",
        args: &ARGS_OPEN,
    },
    CommandSpec {
        id: "quit",
        title: "Quit",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn find_command_spec(id: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.id == id)
}

/// One-line usage string, e.g. `goto-page <page>`.
pub fn usage(spec: &CommandSpec) -> String {
    let mut usage = spec.id.to_string();
    for arg in spec.args {
        if arg.required {
            usage.push_str(&format!(" <{}>", arg.name));
        } else {
            usage.push_str(&format!(" [{}]", arg.name));
        }
    }
    usage
}
