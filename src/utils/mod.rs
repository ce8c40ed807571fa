// Utils compartidos

pub mod clock;
pub mod constants;
pub mod storage;
pub mod time;

pub use clock::*;
pub use constants::*;
pub use storage::*;
pub use time::*;
