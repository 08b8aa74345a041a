pub mod validator;

pub use validator::{
    MatchSubmission, NewPlayer, PLACEHOLDER, PlayerUpdate, Rejection, Selection, validate,
    validate_player_name, validate_player_update,
};
