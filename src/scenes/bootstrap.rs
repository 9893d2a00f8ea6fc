// bootstrap.rs - Sequential load-and-assemble of the three models
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::assembler::{
    attach_braces, attach_document, attach_pill, attach_pill_group, Braces, Document, Pill,
};
use crate::config::AssetLocators;
use crate::context::AppContext;
use crate::loaders::{load_model, LoadError, LoadedModel};
use crate::scene::NodeId;
use crate::traits::ModelLoader;

/// Everything bootstrap placed in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembledScene {
    pub braces: Braces,
    pub pill: Pill,
    pub document: Document,
}

type PendingModel = Pin<Box<dyn Future<Output = Result<LoadedModel, LoadError>>>>;

#[derive(Debug, Clone, Copy)]
enum Stage {
    Braces,
    Pill { braces: Braces, group: NodeId },
    Document { braces: Braces, pill: Pill },
    Finished,
}

/// Bootstrap as a pollable task
///
/// The context is only borrowed while `poll` runs, so the owner keeps
/// handling window events between polls. Each model is requested only after
/// the previous one is in the scene; the first failure finishes the task.
pub struct BootstrapTask {
    assets: AssetLocators,
    stage: Stage,
    pending: Option<PendingModel>,
}

impl BootstrapTask {
    pub fn new(assets: AssetLocators) -> Self {
        Self {
            assets,
            stage: Stage::Braces,
            pending: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Advance as far as completed loads allow
    ///
    /// Returns `Pending` while a load is outstanding; `cx`'s waker fires when
    /// it completes. A finished task stays pending.
    pub fn poll<L>(
        &mut self,
        ctx: &mut AppContext,
        loader: &L,
        cx: &mut Context<'_>,
    ) -> Poll<Result<AssembledScene, LoadError>>
    where
        L: ModelLoader + ?Sized,
    {
        loop {
            let locator = match self.stage {
                Stage::Braces => &self.assets.braces,
                Stage::Pill { .. } => &self.assets.pill,
                Stage::Document { .. } => &self.assets.document,
                Stage::Finished => return Poll::Pending,
            };
            let pending = self
                .pending
                .get_or_insert_with(|| Box::pin(load_model(loader, locator)));

            let loaded = match pending.as_mut().poll(cx) {
                Poll::Ready(loaded) => loaded,
                Poll::Pending => return Poll::Pending,
            };
            self.pending = None;

            let stage = std::mem::replace(&mut self.stage, Stage::Finished);
            let model = loaded?;
            match stage {
                Stage::Braces => {
                    let braces = attach_braces(ctx, &model)?;
                    // The group goes in before the pill is requested
                    let group = attach_pill_group(ctx);
                    self.stage = Stage::Pill { braces, group };
                }
                Stage::Pill { braces, group } => {
                    let pill = attach_pill(ctx, group, &model)?;
                    self.stage = Stage::Document { braces, pill };
                }
                Stage::Document { braces, pill } => {
                    let document = attach_document(ctx, &model)?;
                    log::info!(
                        "Scene assembled: {} nodes, {} materials",
                        ctx.scene.len(),
                        ctx.materials.len()
                    );
                    return Poll::Ready(Ok(AssembledScene {
                        braces,
                        pill,
                        document,
                    }));
                }
                Stage::Finished => return Poll::Pending,
            }
        }
    }
}

/// Load braces, pill and document one after another and assemble each as it arrives
///
/// Attachment order is request order whatever the load times are. The first
/// failure aborts the rest.
pub async fn bootstrap<L>(
    ctx: &mut AppContext,
    loader: &L,
    assets: &AssetLocators,
) -> Result<AssembledScene, LoadError>
where
    L: ModelLoader + ?Sized,
{
    let mut task = BootstrapTask::new(assets.clone());
    futures::future::poll_fn(|cx| task.poll(ctx, loader, cx)).await
}
