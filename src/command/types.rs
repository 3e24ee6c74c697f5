#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SubmitSearch { query: String },
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GotoPage { page: usize },
    ClearSearch,
    HistoryBack,
    HistoryForward,
    OpenLocation { location: String },
    OpenSearch,
    OpenCommandLine,
    SelectNext,
    SelectPrev,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    SubmitSearch,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GotoPage,
    ClearSearch,
    HistoryBack,
    HistoryForward,
    OpenLocation,
    OpenSearch,
    OpenCommandLine,
    SelectNext,
    SelectPrev,
    Cancel,
    Quit,
    Input,
    ParseCommand,
    FetchComplete,
    FetchFailed,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitSearch => "search",
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::FirstPage => "first-page",
            Self::LastPage => "last-page",
            Self::GotoPage => "goto-page",
            Self::ClearSearch => "clear",
            Self::HistoryBack => "history-back",
            Self::HistoryForward => "history-forward",
            Self::OpenLocation => "open",
            Self::OpenSearch => "open-search",
            Self::OpenCommandLine => "open-command-line",
            Self::SelectNext => "select-next",
            Self::SelectPrev => "select-prev",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::ParseCommand => "parse-command",
            Self::FetchComplete => "fetch-complete",
            Self::FetchFailed => "fetch-failed",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::SubmitSearch { .. } => ActionId::SubmitSearch,
            Self::NextPage => ActionId::NextPage,
            Self::PrevPage => ActionId::PrevPage,
            Self::FirstPage => ActionId::FirstPage,
            Self::LastPage => ActionId::LastPage,
            Self::GotoPage { .. } => ActionId::GotoPage,
            Self::ClearSearch => ActionId::ClearSearch,
            Self::HistoryBack => ActionId::HistoryBack,
            Self::HistoryForward => ActionId::HistoryForward,
            Self::OpenLocation { .. } => ActionId::OpenLocation,
            Self::OpenSearch => ActionId::OpenSearch,
            Self::OpenCommandLine => ActionId::OpenCommandLine,
            Self::SelectNext => ActionId::SelectNext,
            Self::SelectPrev => ActionId::SelectPrev,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }

    /// Whether the command moves between result pages.
    pub fn is_page_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextPage | Self::PrevPage | Self::FirstPage | Self::LastPage | Self::GotoPage { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Positive integer.
    Page,
    /// Rest of the line, verbatim.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
