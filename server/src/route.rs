pub use self::{book::*, loan::*};

mod book;
mod loan;
