use futures::channel::oneshot;
use std::future::Future;

use super::model::{LoadError, LoadedModel};
use crate::traits::ModelLoader;

/// Start a load and return a future that settles with its result
///
/// Awaiting several of these one after another keeps request order: the next
/// load is only started once the previous future resolved.
pub fn load_model<L>(
    loader: &L,
    locator: &str,
) -> impl Future<Output = Result<LoadedModel, LoadError>> + 'static
where
    L: ModelLoader + ?Sized,
{
    let (sender, receiver) = oneshot::channel();
    log::debug!("Requesting {}", locator);
    loader.load(
        locator,
        Box::new(move |result| {
            // Receiver gone means nobody is waiting any more
            let _ = sender.send(result);
        }),
    );

    let locator = locator.to_string();
    async move {
        match receiver.await {
            Ok(result) => result,
            Err(oneshot::Canceled) => Err(LoadError::Abandoned { locator }),
        }
    }
}
