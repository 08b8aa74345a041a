mod controller;
mod gate;
#[cfg(test)]
pub(crate) mod testing;
mod view_slot;

pub use controller::{
    Confirm, Coordinator, DELETE_PLAYER_PROMPT, DELETE_PROMPT, DeleteOutcome, ProfileSnapshot,
    ProfileView,
};
pub use gate::{SubmissionGate, SubmissionPermit};
pub use view_slot::{Applied, RefreshTicket, ViewSlot, ViewState};
