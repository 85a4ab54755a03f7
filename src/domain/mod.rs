mod category;
mod dashboard;
mod expense;
mod group;
mod income;
mod money;
mod month;
mod user;

pub use category::*;
pub use dashboard::*;
pub use expense::*;
pub use group::*;
pub use income::*;
pub use money::*;
pub use month::*;
pub use user::*;
