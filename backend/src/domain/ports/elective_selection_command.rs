//! Driving port for a student's elective choices.

use async_trait::async_trait;

use crate::domain::{PairChoices, SelectionError, SelectionPage, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElectiveSelectionCommand: Send + Sync {
    /// Pairs offered to `student` this semester together with current
    /// choices.
    async fn selection_page(&self, student: &User) -> Result<SelectionPage, SelectionError>;

    /// Replace the student's choices with one course per pair; returns the
    /// number of courses stored.
    async fn submit(&self, student: &User, choices: &PairChoices) -> Result<usize, SelectionError>;

    /// Drop every choice while enrollment is open; returns the number
    /// removed.
    async fn cancel(&self, student: &User) -> Result<usize, SelectionError>;
}
