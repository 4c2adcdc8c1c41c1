pub mod account;
pub mod format;
pub mod response;
pub mod top_up;
pub mod transaction;
pub mod view;

pub use account::*;
pub use response::*;
pub use top_up::*;
pub use transaction::*;
pub use view::*;
