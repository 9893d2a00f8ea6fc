use matrix_scene::config::{AssetLocators, SceneConfig};
use matrix_scene::core::{notify_waker, PointerAction};
use matrix_scene::loaders::{LoadedModel, ModelNode};
use matrix_scene::scene::{MeshData, Transform};
use matrix_scene::traits::{LoadCallback, ModelLoader, WindowContext};
use matrix_scene::{AppContext, BootstrapTask, LoopState, RenderLoop};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// Keeps every callback until the test decides to complete it
#[derive(Default)]
struct HeldLoader {
    held: Mutex<Vec<(String, LoadCallback)>>,
}

impl HeldLoader {
    fn requested(&self) -> Vec<String> {
        self.held
            .lock()
            .unwrap()
            .iter()
            .map(|(locator, _)| locator.clone())
            .collect()
    }

    fn complete_next(&self) {
        let (locator, callback) = self.held.lock().unwrap().remove(0);
        callback(Ok(model(&locator)));
    }
}

impl ModelLoader for HeldLoader {
    fn load(&self, locator: &str, on_complete: LoadCallback) {
        self.held
            .lock()
            .unwrap()
            .push((locator.to_string(), on_complete));
    }
}

fn model(locator: &str) -> LoadedModel {
    LoadedModel {
        locator: locator.to_string(),
        roots: vec![ModelNode {
            name: locator.to_string(),
            transform: Transform::IDENTITY,
            mesh: Some(Arc::new(MeshData::new(
                vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                None,
                None,
                None,
            ))),
            children: Vec::new(),
        }],
    }
}

#[derive(Default)]
struct CountingWindow {
    redraws: Cell<u32>,
}

impl WindowContext for CountingWindow {
    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

fn counting_waker() -> (Waker, Arc<AtomicUsize>) {
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    let waker = notify_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (waker, wakes)
}

#[cfg(test)]
mod bootstrap_task_tests {
    use super::*;

    #[test]
    fn test_stalled_load_leaves_context_responsive() {
        let loader = HeldLoader::default();
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);
        let mut task = BootstrapTask::new(AssetLocators::default());
        let mut render_loop = RenderLoop::new();
        let (waker, wakes) = counting_waker();
        let mut cx = Context::from_waker(&waker);

        // The braces load never completes
        for _ in 0..3 {
            assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());
        }
        assert_eq!(loader.requested(), vec![AssetLocators::default().braces]);

        // Window events keep being applied in the meantime
        let aspect = ctx.resize(1920, 1080, 1.5);
        assert_eq!(aspect, 1920.0 / 1080.0);
        ctx.apply_pointer(PointerAction::Dolly { zoom_in: true });
        ctx.apply_pointer(PointerAction::Moved { x: 4.0, y: 2.0 });

        assert_eq!(render_loop.state(), LoopState::Idle);
        assert!(!task.is_finished());
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
        assert!(ctx.scene.roots().is_empty());

        let window = CountingWindow::default();
        render_loop.start(&window);
        assert_eq!(window.redraws.get(), 1);
    }

    #[test]
    fn test_each_completion_wakes_and_advances_one_stage() {
        let assets = AssetLocators::default();
        let loader = HeldLoader::default();
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);
        let mut task = BootstrapTask::new(assets.clone());
        let (waker, wakes) = counting_waker();
        let mut cx = Context::from_waker(&waker);

        assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());

        loader.complete_next();
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
        assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());
        // Braces pair plus the empty pill group
        assert_eq!(ctx.scene.roots().len(), 3);
        assert_eq!(loader.requested(), vec![assets.pill.clone()]);

        loader.complete_next();
        assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());
        assert_eq!(loader.requested(), vec![assets.document.clone()]);

        loader.complete_next();
        assert_eq!(wakes.load(Ordering::SeqCst), 3);
        let assembled = match task.poll(&mut ctx, &loader, &mut cx) {
            Poll::Ready(Ok(assembled)) => assembled,
            other => panic!("expected assembled scene, got {:?}", other.map(|r| r.is_ok())),
        };

        assert!(task.is_finished());
        assert_eq!(ctx.scene.roots().len(), 5);
        assert_eq!(
            ctx.selector.as_ref().map(|s| s.target()),
            Some(assembled.document.body)
        );

        // Nothing more is requested once finished
        assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());
        assert!(loader.requested().is_empty());
    }

    #[test]
    fn test_dropped_callback_finishes_with_error() {
        let loader = HeldLoader::default();
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);
        let mut task = BootstrapTask::new(AssetLocators::default());
        let (waker, _) = counting_waker();
        let mut cx = Context::from_waker(&waker);

        assert!(task.poll(&mut ctx, &loader, &mut cx).is_pending());
        loader.held.lock().unwrap().clear();

        assert!(matches!(
            task.poll(&mut ctx, &loader, &mut cx),
            Poll::Ready(Err(_))
        ));
        assert!(task.is_finished());
    }
}
