pub mod assembler;
pub mod bootstrap;

pub use assembler::{
    attach_braces, attach_document, attach_pill, attach_pill_group, Braces, Document, Pill,
};
pub use bootstrap::{bootstrap, AssembledScene, BootstrapTask};
