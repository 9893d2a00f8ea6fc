use matrix_scene::config::{AssetLocators, SceneConfig};
use matrix_scene::loaders::{LoadError, LoadedModel, ModelNode};
use matrix_scene::scene::{MeshData, Transform};
use matrix_scene::traits::{LoadCallback, ModelLoader};
use matrix_scene::{bootstrap, AppContext};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Completes each request on its own thread after a per-locator delay
struct DelayedLoader {
    delays: HashMap<String, u64>,
    failing: Option<String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl DelayedLoader {
    fn new(delays: [u64; 3]) -> Self {
        let assets = AssetLocators::default();
        let delays = [assets.braces, assets.pill, assets.document]
            .into_iter()
            .zip(delays)
            .collect();
        Self {
            delays,
            failing: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn triangle_model(locator: &str) -> LoadedModel {
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

impl ModelLoader for DelayedLoader {
    fn load(&self, locator: &str, on_complete: LoadCallback) {
        self.requests.lock().unwrap().push(locator.to_string());
        let delay = self.delays.get(locator).copied().unwrap_or(0);
        let fail = self.failing.as_deref() == Some(locator);
        let locator = locator.to_string();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay));
            if fail {
                on_complete(Err(LoadError::EmptyScene { locator }));
            } else {
                on_complete(Ok(triangle_model(&locator)));
            }
        });
    }
}

fn permutations() -> Vec<[u64; 3]> {
    let d = [0u64, 15, 40];
    vec![
        [d[0], d[1], d[2]],
        [d[0], d[2], d[1]],
        [d[1], d[0], d[2]],
        [d[1], d[2], d[0]],
        [d[2], d[0], d[1]],
        [d[2], d[1], d[0]],
    ]
}

#[cfg(test)]
mod bootstrap_order_tests {
    use super::*;

    #[test]
    fn test_attachment_follows_request_order_for_any_delays() {
        let assets = AssetLocators::default();

        for delays in permutations() {
            let loader = DelayedLoader::new(delays);
            let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);

            let assembled = pollster::block_on(bootstrap(&mut ctx, &loader, &assets))
                .unwrap_or_else(|e| panic!("bootstrap failed for {:?}: {}", delays, e));

            assert_eq!(
                loader.requests(),
                vec![assets.braces.clone(), assets.pill.clone(), assets.document.clone()],
                "delays {:?}",
                delays
            );
            assert_eq!(
                ctx.scene.roots(),
                &[
                    assembled.braces.left,
                    assembled.braces.right,
                    assembled.pill.group,
                    assembled.document.body,
                    assembled.document.shadow,
                ],
                "delays {:?}",
                delays
            );
            assert_eq!(ctx.scene.node(assembled.braces.left).name, assets.braces);
            assert_eq!(ctx.scene.node(assembled.pill.top).name, assets.pill);
            assert_eq!(ctx.scene.node(assembled.document.body).name, assets.document);
        }
    }

    #[test]
    fn test_failure_stops_remaining_loads() {
        let assets = AssetLocators::default();
        let mut loader = DelayedLoader::new([0, 0, 0]);
        loader.failing = Some(assets.pill.clone());
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);

        let err = pollster::block_on(bootstrap(&mut ctx, &loader, &assets)).unwrap_err();

        assert!(matches!(err, LoadError::EmptyScene { ref locator } if *locator == assets.pill));
        assert_eq!(loader.requests(), vec![assets.braces.clone(), assets.pill.clone()]);
        assert!(ctx.selector.is_none());
        // Braces plus the pill group that is attached before the pill load
        assert_eq!(ctx.scene.roots().len(), 3);
    }

    #[test]
    fn test_bootstrapped_scene_has_two_tweens_and_a_selector() {
        let loader = DelayedLoader::new([0, 0, 0]);
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);

        let assembled =
            pollster::block_on(bootstrap(&mut ctx, &loader, &AssetLocators::default())).unwrap();

        assert_eq!(ctx.animator.len(), 2);
        assert_eq!(
            ctx.selector.as_ref().map(|s| s.target()),
            Some(assembled.document.body)
        );
        assert_eq!(ctx.scene.renderables().len(), 6);
    }
}
