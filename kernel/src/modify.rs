mod book;
mod loan;

pub use self::{book::*, loan::*};
