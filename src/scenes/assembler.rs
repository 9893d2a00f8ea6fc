// assembler.rs - Places each loaded model into the scene with its fixed look
use std::f32::consts::PI;

use crate::context::AppContext;
use crate::loaders::{LoadError, LoadedModel};
use crate::panel::MaterialSelector;
use crate::scene::{Channel, Material, Node, NodeId, ShadowMaterial, StandardMaterial};

pub const BRACES_COLOR: u32 = 0xFFCE00;
pub const PILL_COLOR: u32 = 0xFF004C;
pub const WIREFRAME_COLOR: u32 = 0xFFFFFF;
pub const SHADOW_OPACITY: f32 = 0.7;

/// Node handles of the assembled scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Braces {
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pill {
    pub group: NodeId,
    pub top: NodeId,
    pub bottom: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub body: NodeId,
    pub shadow: NodeId,
}

fn set_cast_shadow(ctx: &mut AppContext, id: NodeId) {
    ctx.scene.for_each_in_subtree(id, |node| node.cast_shadow = true);
}

/// Yellow braces at x = -2 plus a mirrored clone at x = 2
pub fn attach_braces(ctx: &mut AppContext, model: &LoadedModel) -> Result<Braces, LoadError> {
    let yellow = ctx
        .materials
        .add(Material::Standard(StandardMaterial::new(BRACES_COLOR, 0.0, 0.5)));

    let left = model.instantiate_first(&mut ctx.scene)?;
    ctx.scene.paint(left, yellow);
    set_cast_shadow(ctx, left);
    ctx.scene.node_mut(left).transform.position.x = -2.0;
    ctx.scene.add(left);

    let right = ctx.scene.clone_node(left);
    let transform = &mut ctx.scene.node_mut(right).transform;
    transform.position.x = 2.0;
    transform.rotation.y = PI;
    ctx.scene.add(right);

    log::debug!("Attached braces from {}", model.locator);
    Ok(Braces { left, right })
}

/// Empty group the pill halves hang from; attached before the pill is loaded
pub fn attach_pill_group(ctx: &mut AppContext) -> NodeId {
    let mut group = Node::group("pill");
    group.transform.rotation.x = PI * 0.5;
    let id = ctx.scene.spawn(group);
    ctx.scene.add(id);
    id
}

/// Red top, wireframe bottom, and the two looping spins on the group
pub fn attach_pill(
    ctx: &mut AppContext,
    group: NodeId,
    model: &LoadedModel,
) -> Result<Pill, LoadError> {
    let red = ctx
        .materials
        .add(Material::Standard(StandardMaterial::new(PILL_COLOR, 0.5, 0.4)));
    let wireframe = ctx.materials.add(Material::Standard(
        StandardMaterial::new(WIREFRAME_COLOR, 0.5, 0.4).wireframe(),
    ));

    let top = model.instantiate_first(&mut ctx.scene)?;
    ctx.scene.paint(top, red);
    ctx.scene.node_mut(top).transform.scale = glam::Vec3::splat(0.6);
    set_cast_shadow(ctx, top);
    ctx.scene.add_child(group, top);

    let bottom = ctx.scene.clone_node(top);
    ctx.scene.paint(bottom, wireframe);
    let transform = &mut ctx.scene.node_mut(bottom).transform;
    transform.rotation.x = PI;
    transform.position.y = -0.085;
    set_cast_shadow(ctx, bottom);
    ctx.scene.add_child(group, bottom);

    ctx.animator
        .animate_loop(&ctx.scene, group, Channel::RotationX, PI * 2.5, 2.0);
    ctx.animator
        .animate_loop(&ctx.scene, group, Channel::RotationZ, PI * 2.0, 5.0);

    log::debug!("Attached pill from {}", model.locator);
    Ok(Pill { group, top, bottom })
}

/// Matrix-shaded document and the shadow-catching copy just above it
pub fn attach_document(ctx: &mut AppContext, model: &LoadedModel) -> Result<Document, LoadError> {
    let body = model.instantiate_first(&mut ctx.scene)?;
    ctx.scene.paint(body, ctx.palette.matrix);
    let transform = &mut ctx.scene.node_mut(body).transform;
    transform.rotation.y = PI * 0.5;
    transform.rotation.x = PI * 0.55;
    transform.scale = glam::Vec3::splat(1.5);
    transform.position.y = -1.5;
    ctx.scene.add(body);

    let shadow_material = ctx.materials.add(Material::Shadow(ShadowMaterial {
        opacity: SHADOW_OPACITY,
    }));
    let shadow = ctx.scene.clone_node(body);
    ctx.scene.paint(shadow, shadow_material);
    ctx.scene
        .for_each_in_subtree(shadow, |node| node.receive_shadow = true);
    ctx.scene.node_mut(shadow).transform.position.y = -1.49;
    ctx.scene.add(shadow);

    ctx.selector = Some(MaterialSelector::new(body, ctx.palette));

    log::debug!("Attached document from {}", model.locator);
    Ok(Document { body, shadow })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::loaders::ModelNode;
    use crate::scene::{MeshData, Transform};
    use std::sync::Arc;

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

    fn context() -> AppContext {
        AppContext::new(&SceneConfig::default(), 800, 600, 1.0)
    }

    fn standard(ctx: &AppContext, id: NodeId) -> StandardMaterial {
        match ctx.scene.node(id).material.and_then(|m| ctx.materials.get(m)) {
            Some(Material::Standard(m)) => *m,
            other => panic!("expected standard material, got {:?}", other),
        }
    }

    #[test]
    fn test_braces_are_mirrored_pair() {
        let mut ctx = context();
        let braces = attach_braces(&mut ctx, &model("braces")).unwrap();

        let left = ctx.scene.node(braces.left);
        let right = ctx.scene.node(braces.right);
        assert_eq!(left.transform.position.x, -2.0);
        assert_eq!(right.transform.position.x, 2.0);
        assert_eq!(right.transform.rotation.y, PI);
        assert!(left.cast_shadow && right.cast_shadow);
        assert_eq!(left.material, right.material);
        assert_eq!(left.mesh.as_ref().map(Arc::as_ptr), right.mesh.as_ref().map(Arc::as_ptr));

        let yellow = standard(&ctx, braces.left);
        assert_eq!(yellow.metalness, 0.0);
        assert_eq!(yellow.roughness, 0.5);
        assert_eq!(ctx.scene.roots(), &[braces.left, braces.right]);
    }

    #[test]
    fn test_pill_halves_hang_from_spinning_group() {
        let mut ctx = context();
        let group = attach_pill_group(&mut ctx);
        assert_eq!(ctx.scene.node(group).transform.rotation.x, PI * 0.5);

        let pill = attach_pill(&mut ctx, group, &model("pill")).unwrap();

        assert_eq!(ctx.scene.node(group).children(), &[pill.top, pill.bottom]);
        assert_eq!(ctx.scene.node(pill.top).transform.scale, glam::Vec3::splat(0.6));
        let bottom = ctx.scene.node(pill.bottom).transform;
        assert_eq!(bottom.rotation.x, PI);
        assert_eq!(bottom.position.y, -0.085);
        assert!(standard(&ctx, pill.bottom).wireframe);
        assert!(!standard(&ctx, pill.top).wireframe);
        assert_eq!(ctx.animator.len(), 2);
    }

    #[test]
    fn test_document_gets_matrix_material_and_shadow_layer() {
        let mut ctx = context();
        let doc = attach_document(&mut ctx, &model("document")).unwrap();

        let body = ctx.scene.node(doc.body);
        assert_eq!(body.material, Some(ctx.palette.matrix));
        assert_eq!(body.transform.position.y, -1.5);
        assert_eq!(body.transform.scale, glam::Vec3::splat(1.5));

        let shadow = ctx.scene.node(doc.shadow);
        assert!(shadow.receive_shadow);
        assert_eq!(shadow.transform.position.y, -1.49);
        match shadow.material.and_then(|m| ctx.materials.get(m)) {
            Some(Material::Shadow(m)) => assert_eq!(m.opacity, SHADOW_OPACITY),
            other => panic!("expected shadow material, got {:?}", other),
        }

        let selector = ctx.selector.as_ref().unwrap();
        assert_eq!(selector.target(), doc.body);
    }

    #[test]
    fn test_model_without_roots_is_rejected() {
        let mut ctx = context();
        let empty = LoadedModel {
            locator: "models/empty.glb".to_string(),
            roots: Vec::new(),
        };
        assert!(matches!(
            attach_braces(&mut ctx, &empty),
            Err(LoadError::EmptyScene { .. })
        ));
        assert!(ctx.scene.roots().is_empty());
    }
}
