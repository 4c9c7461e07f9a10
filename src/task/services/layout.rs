//! Board layout: status lanes, cards and the summary line.
//!
//! The layout is a pure function of a [`BoardSnapshot`], a [`TaskFilter`]
//! and [`LayoutOptions`]. It is rebuilt after every store change and never
//! writes back.

use super::{BoardSnapshot, SyncState, TaskFilter};
use crate::task::domain::{
    EmployeeId, MoveDirection, MoveIntent, Task, TaskId, TaskPriority, TaskStatus,
};
use chrono::{DateTime, Utc};

/// Description length shown on a card before truncation.
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

const ELLIPSIS: &str = "...";
const UNASSIGNED_LABEL: &str = "Unassigned";
const UNKNOWN_INITIAL: char = '?';

/// Render-time inputs that are not part of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    now: DateTime<Utc>,
    preview_chars: usize,
    hovered_lane: Option<TaskStatus>,
}

impl LayoutOptions {
    /// Creates options evaluating overdue flags against `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            hovered_lane: None,
        }
    }

    /// Sets the description preview length.
    #[must_use]
    pub const fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Marks the lane currently under a dragged card.
    #[must_use]
    pub const fn with_hovered_lane(mut self, lane: Option<TaskStatus>) -> Self {
        self.hovered_lane = lane;
        self
    }
}

/// Affordance offered on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Step back towards `pending`.
    MoveBack,
    /// Step forward towards `completed`.
    MoveForward,
    /// Approve a task waiting for approval.
    Approve,
    /// Reject a task waiting for approval.
    Reject,
    /// Ask to delete the task.
    Delete,
}

impl CardAction {
    /// Returns the actions applicable to a task in `status`.
    #[must_use]
    pub fn for_status(status: TaskStatus) -> Vec<Self> {
        let mut actions = Vec::new();
        if status.awaits_approval() {
            actions.extend([Self::Approve, Self::Reject]);
        } else {
            if status.step(MoveDirection::Back).is_some() {
                actions.push(Self::MoveBack);
            }
            if status.step(MoveDirection::Forward).is_some() {
                actions.push(Self::MoveForward);
            }
        }
        actions.push(Self::Delete);
        actions
    }
}

/// Possibly shortened description with an expansion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPreview {
    /// Text to display.
    pub text: String,
    /// Whether the full description is longer than `text`.
    pub truncated: bool,
}

impl DescriptionPreview {
    /// Shortens `full` to `limit` characters plus an ellipsis.
    #[must_use]
    pub fn new(full: &str, limit: usize) -> Self {
        if full.chars().count() <= limit {
            return Self {
                text: full.to_owned(),
                truncated: false,
            };
        }
        let mut text: String = full.chars().take(limit).collect();
        text.push_str(ELLIPSIS);
        Self {
            text,
            truncated: true,
        }
    }
}

/// Assignee display with avatar initial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeBadge {
    /// Resolved employee, if any.
    pub employee_id: Option<EmployeeId>,
    /// Display name, "Unassigned" when unresolved.
    pub name: String,
    /// Avatar letter, `?` when unresolved.
    pub initial: char,
}

impl AssigneeBadge {
    fn resolve(task: &Task, snapshot: &BoardSnapshot) -> Self {
        task.assigned_to()
            .and_then(|id| snapshot.employee(id))
            .map_or_else(
                || Self {
                    employee_id: None,
                    name: UNASSIGNED_LABEL.to_owned(),
                    initial: UNKNOWN_INITIAL,
                },
                |employee| Self {
                    employee_id: Some(employee.id().clone()),
                    name: employee.name().to_owned(),
                    initial: employee.initial(),
                },
            )
    }
}

/// Due date display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueIndicator {
    /// Due date.
    pub due: DateTime<Utc>,
    /// Whether the task is overdue.
    pub overdue: bool,
}

/// Rendering contract for a single task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task identifier.
    pub id: TaskId,
    /// Lane the card sits in.
    pub status: TaskStatus,
    /// Title.
    pub title: String,
    /// Description preview, if the task has a description.
    pub description: Option<DescriptionPreview>,
    /// Assignee badge.
    pub assignee: AssigneeBadge,
    /// Priority badge.
    pub priority: TaskPriority,
    /// Due date indicator, if the task has a due date.
    pub due: Option<DueIndicator>,
    /// Display labels.
    pub tags: Vec<String>,
    /// Remote confirmation state.
    pub sync: SyncState,
    /// Applicable actions.
    pub actions: Vec<CardAction>,
}

impl TaskCard {
    fn build(task: &Task, snapshot: &BoardSnapshot, options: &LayoutOptions) -> Self {
        Self {
            id: task.id().clone(),
            status: task.status(),
            title: task.title().to_owned(),
            description: task
                .description()
                .map(|text| DescriptionPreview::new(text, options.preview_chars)),
            assignee: AssigneeBadge::resolve(task, snapshot),
            priority: task.priority(),
            due: task.due_date().map(|due| DueIndicator {
                due,
                overdue: task.is_overdue(options.now),
            }),
            tags: task.tags().iter().cloned().collect(),
            sync: snapshot.sync_state(task.id()),
            actions: CardAction::for_status(task.status()),
        }
    }

    /// Returns the move-intent this card carries when dragged.
    #[must_use]
    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent::new(self.id.clone(), self.status)
    }

    /// Returns `true` when `action` is offered on this card.
    #[must_use]
    pub fn offers(&self, action: CardAction) -> bool {
        self.actions.contains(&action)
    }
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// Status shared by every card in the lane.
    pub status: TaskStatus,
    /// Header label.
    pub label: &'static str,
    /// Number of visible cards.
    pub count: usize,
    /// Cards in store order.
    pub cards: Vec<TaskCard>,
    /// Whether the lane shows the create-task affordance.
    pub accepts_create: bool,
    /// Whether a dragged card is hovering over the lane.
    pub drag_over: bool,
}

/// Counts shown above the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    /// Tasks passing the filter.
    pub visible: usize,
    /// Tasks in the store.
    pub total: usize,
    /// Store totals per status, in board order.
    pub per_status: Vec<(TaskStatus, usize)>,
    /// Overdue tasks in the store.
    pub overdue: usize,
}

impl BoardSummary {
    /// Returns the "Showing N of M tasks" line.
    #[must_use]
    pub fn showing_line(&self) -> String {
        format!("Showing {} of {} tasks", self.visible, self.total)
    }
}

/// Complete board rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    /// Lanes in board order.
    pub lanes: Vec<Lane>,
    /// Summary counts.
    pub summary: BoardSummary,
}

impl BoardLayout {
    /// Builds the board from a store snapshot.
    #[must_use]
    pub fn build(snapshot: &BoardSnapshot, filter: &TaskFilter, options: &LayoutOptions) -> Self {
        let visible = filter.apply(&snapshot.tasks);

        let lanes = TaskStatus::BOARD_ORDER
            .iter()
            .map(|&status| {
                let cards: Vec<TaskCard> = visible
                    .iter()
                    .filter(|task| task.status() == status)
                    .map(|task| TaskCard::build(task, snapshot, options))
                    .collect();
                Lane {
                    status,
                    label: status.label(),
                    count: cards.len(),
                    cards,
                    accepts_create: status == TaskStatus::Pending,
                    drag_over: options.hovered_lane == Some(status),
                }
            })
            .collect();

        let per_status = TaskStatus::BOARD_ORDER
            .iter()
            .map(|&status| {
                let count = snapshot
                    .tasks
                    .iter()
                    .filter(|task| task.status() == status)
                    .count();
                (status, count)
            })
            .collect();

        let summary = BoardSummary {
            visible: visible.len(),
            total: snapshot.tasks.len(),
            per_status,
            overdue: snapshot
                .tasks
                .iter()
                .filter(|task| task.is_overdue(options.now))
                .count(),
        };

        Self { lanes, summary }
    }

    /// Returns the lane for `status`.
    #[must_use]
    pub fn lane(&self, status: TaskStatus) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.status == status)
    }
}
