mod fuse_world;
mod steps;

pub use fuse_world::FuseWorld;
