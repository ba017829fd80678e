use error_stack::Report;

use kernel::KernelError;

pub use self::{book::*, loan::*};

mod book;
mod loan;

fn required<T>(field: &str, value: Option<T>) -> error_stack::Result<T, KernelError> {
    value.ok_or_else(|| {
        Report::new(KernelError::Validation).attach_printable(format!("{field} is required"))
    })
}
