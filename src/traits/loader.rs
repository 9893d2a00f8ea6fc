use crate::loaders::model::{LoadError, LoadedModel};

/// Completion callback handed to a loader; called at most once
pub type LoadCallback = Box<dyn FnOnce(Result<LoadedModel, LoadError>) + Send + 'static>;

/// Loader capability - starts a load and reports back through a callback
///
/// Implementations may finish on any thread. Dropping the callback without
/// calling it is reported to the awaiting side as `LoadError::Abandoned`.
pub trait ModelLoader {
    fn load(&self, locator: &str, on_complete: LoadCallback);
}
