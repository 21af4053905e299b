pub mod adaptive;
pub use adaptive::*;

pub mod bitmap;
pub use bitmap::*;

pub mod fisher_yates;
pub use fisher_yates::*;

pub mod perfect;
pub use perfect::*;
