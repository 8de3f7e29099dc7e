pub mod board;
pub mod call;
pub mod card;
pub mod contract;
pub mod deal;
pub mod hand;
pub mod io;
pub mod metrics;
pub mod rank;
pub mod strain;
pub mod suit;

pub use board::{Position, Vulnerability};
pub use call::{Call, ParseCallError};
pub use card::Card;
pub use contract::{Contract, FinalContract, ParseContractError};
pub use deal::{Deal, DealProvider, FixedDealer, RandomDealer};
pub use hand::{Distribution, Hand};
pub use metrics::{freakness, Evaluator, HandMetrics, HcpScale, ShapePoints};
pub use rank::Rank;
pub use strain::Strain;
pub use suit::Suit;
