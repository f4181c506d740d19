pub mod envelope;
pub mod errors;
pub mod os;
pub mod ownership;
pub mod payload;
pub mod safepath;

pub use envelope::*;
pub use errors::*;
pub use os::*;
pub use ownership::*;
pub use payload::*;
pub use safepath::*;
