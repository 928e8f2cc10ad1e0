pub mod filter;
pub mod record;
pub mod snapshot;
pub mod status;
pub mod view;

pub use filter::*;
pub use record::*;
pub use snapshot::*;
pub use status::*;
pub use view::*;
