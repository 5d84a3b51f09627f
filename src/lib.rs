pub mod dbgen;
pub mod sink;

mod logger;

pub mod prelude {
    pub use crate::dbgen::prelude::*;
    pub use crate::sink::prelude::*;
}
