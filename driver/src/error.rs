use error_stack::Report;
use kernel::KernelError;

/// Lifts adapter-specific failures into the kernel error vocabulary.
pub trait ConvertError: 'static + Sync + Send {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T: 'static + Sync + Send> ConvertError for Result<T, dotenvy::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
