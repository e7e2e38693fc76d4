//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level):
//! 1. Lifecycle (remount on config change, resize)
//! 2. Pointer (sample latest cursor position)
//! 3. Animate (camera parallax + solid motion)
//! 4. Rendering (implicit, render sub-app)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct LifecycleSet; // mount/resize before anything reads the resources

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PointerSet; // pointer sample written before the frame step reads it

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct AnimateSet;
