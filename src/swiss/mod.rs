pub mod pairing;
pub mod standings;

pub use pairing::pair_adjacent;
pub use standings::rank;
