use crate::api::ApiError;
use crate::error::UserError;
use crate::models::User;
use crate::widgets::shortcut::Shortcut;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(UserError),
    /// Context shortcuts for the footer.
    Shortcuts(Vec<Shortcut>),
    OpenUserForm,
    CloseModal,
    /// Issue one GET for the user list with the current sort query.
    FetchUsers,
    /// Outcome of the fetch tagged with its request generation; stale
    /// generations are discarded by the grid.
    UsersLoaded { seq: u64, result: Result<Vec<User>, ApiError> },
    UserCreated(Result<Box<User>, ApiError>),
}
