//! Application services for the task board.

mod board;
mod drag;
mod filter;
mod layout;

pub use board::{
    BoardSnapshot, CreateTaskRequest, PendingDeletion, SyncFailurePolicy, SyncState,
    TaskBoardError, TaskBoardResult, TaskBoardService,
};
pub use drag::DragTracker;
pub use filter::TaskFilter;
pub use layout::{
    AssigneeBadge, BoardLayout, BoardSummary, CardAction, DEFAULT_PREVIEW_CHARS,
    DescriptionPreview, DueIndicator, Lane, LayoutOptions, TaskCard,
};
