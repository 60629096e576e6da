/// Header and TOC listing command.
pub mod info;
/// Root scene graph command.
pub mod scene;
/// Single segment decode command.
pub mod segment;

mod util;
