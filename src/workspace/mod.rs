pub mod conversion;
pub mod definition;
pub mod display;

pub use conversion::*;
pub use definition::*;
pub use display::*;
