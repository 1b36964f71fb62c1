//! Sidebar view filters ("Home", "Today", "This Week").
//!
//! # Invariants
//! - Weeks are ISO weeks: Monday through Sunday.
//! - Due dates are compared by UTC calendar day.
//! - Only `Home` allows creating tasks.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::task::Task;

/// Navigation entry in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SidebarView {
    #[default]
    Home,
    Today,
    ThisWeek,
}

impl SidebarView {
    pub const ALL: [SidebarView; 3] = [SidebarView::Home, SidebarView::Today, SidebarView::ThisWeek];

    /// Label shown in the sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
        }
    }

    /// Maps a sidebar label back to its view. Surrounding whitespace is
    /// ignored; matching is otherwise exact.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|view| view.label() == label)
    }

    /// Whether the add-task control is offered in this view.
    pub fn allows_task_creation(self) -> bool {
        matches!(self, Self::Home)
    }

    /// Whether `task` belongs in this view on `today`.
    pub fn includes(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::Home => true,
            Self::Today => task.is_due_on(today),
            Self::ThisWeek => {
                let (start, end) = week_bounds(today);
                let due = task.due_date().date_naive();
                start <= due && due <= end
            }
        }
    }
}

impl Display for SidebarView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Monday and Sunday of the ISO week containing `day`.
///
/// Weeks cut off by the calendar range are clamped to `NaiveDate::MIN`/`MAX`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(day.weekday().num_days_from_monday());
    let start = day
        .checked_sub_signed(Duration::days(offset))
        .unwrap_or(NaiveDate::MIN);
    let end = day
        .checked_add_signed(Duration::days(6 - offset))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::{week_bounds, SidebarView};
    use chrono::NaiveDate;

    #[test]
    fn week_bounds_span_monday_to_sunday() {
        // 2025-12-25 is a Thursday.
        let day = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let (start, end) = week_bounds(day);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 22).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 28).unwrap());
    }

    #[test]
    fn week_bounds_clamp_at_calendar_limits() {
        let (start, end) = week_bounds(NaiveDate::MIN);
        assert_eq!(start, NaiveDate::MIN);
        assert!(end >= NaiveDate::MIN);

        let (start, end) = week_bounds(NaiveDate::MAX);
        assert!(start <= NaiveDate::MAX);
        assert_eq!(end, NaiveDate::MAX);
    }

    #[test]
    fn labels_roundtrip() {
        for view in SidebarView::ALL {
            assert_eq!(SidebarView::from_label(view.label()), Some(view));
        }
        assert_eq!(SidebarView::from_label(" This Week "), Some(SidebarView::ThisWeek));
        assert_eq!(SidebarView::from_label("Someday"), None);
    }

    #[test]
    fn only_home_allows_task_creation() {
        assert!(SidebarView::Home.allows_task_creation());
        assert!(!SidebarView::Today.allows_task_creation());
        assert!(!SidebarView::ThisWeek.allows_task_creation());
    }
}
