pub(crate) mod ease;
pub(crate) mod entrance;
pub(crate) mod keyframes;
pub(crate) mod looping;
pub(crate) mod motion_path;
pub(crate) mod zoom;
