mod asset;
mod city;
mod gym;
mod reservation;
mod timetable;
mod user;

pub use self::asset::*;
pub use self::city::*;
pub use self::gym::*;
pub use self::reservation::*;
pub use self::timetable::*;
pub use self::user::*;
