mod interval;
mod point;
mod repeated;

pub use self::interval::*;
pub use self::point::*;
pub use self::repeated::*;
