/// A page request echoed through to the `MessageStore`; cursor encoding
/// and ordering semantics belong to the store, not to this core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

/// A page of messages plus the pagination echoes the assembler forwards
/// into its output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
