// Domain layer: Leitner boxes, cards, daily sessions and the ports they are stored through.
// Pure in-memory logic; no I/O and no logging here.

mod card;
mod category;
mod review_result;
mod review_session;
mod tag;
mod user_id;

pub mod ports;

pub use card::Card;
pub use category::Category;
pub use review_result::ReviewResult;
pub use review_session::{ReviewSession, SessionState, SessionStats};
pub use tag::Tag;
pub use user_id::UserId;
