use thiserror::Error;

use crate::scene::{MaterialId, NodeId, Scene};

/// Materials the document can be switched between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialOption {
    Matrix2D,
    Matrix3D,
}

impl MaterialOption {
    pub const ALL: [MaterialOption; 2] = [MaterialOption::Matrix2D, MaterialOption::Matrix3D];

    pub fn label(self) -> &'static str {
        match self {
            MaterialOption::Matrix2D => "Matrix2D",
            MaterialOption::Matrix3D => "Matrix3D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.label() == label)
    }
}

/// Shader materials backing each option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialPalette {
    pub matrix: MaterialId,
    pub test01: MaterialId,
}

impl MaterialPalette {
    pub fn material(&self, option: MaterialOption) -> MaterialId {
        match option {
            MaterialOption::Matrix2D => self.matrix,
            MaterialOption::Matrix3D => self.test01,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unknown material option {0:?}")]
    UnknownOption(String),
}

/// Swaps the material of one node between the palette entries
#[derive(Debug, Clone)]
pub struct MaterialSelector {
    target: NodeId,
    palette: MaterialPalette,
    current: MaterialOption,
}

impl MaterialSelector {
    pub fn new(target: NodeId, palette: MaterialPalette) -> Self {
        Self {
            target,
            palette,
            current: MaterialOption::Matrix2D,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn current(&self) -> MaterialOption {
        self.current
    }

    pub fn select(&mut self, scene: &mut Scene, option: MaterialOption) {
        let material = self.palette.material(option);
        scene.paint(self.target, material);
        if option != self.current {
            log::debug!("Document material -> {}", option.label());
        }
        self.current = option;
    }

    /// Select by display label; anything outside the closed set is rejected
    pub fn select_by_name(
        &mut self,
        scene: &mut Scene,
        name: &str,
    ) -> Result<MaterialOption, SelectError> {
        let option = MaterialOption::from_label(name)
            .ok_or_else(|| SelectError::UnknownOption(name.to_string()))?;
        self.select(scene, option);
        Ok(option)
    }
}
