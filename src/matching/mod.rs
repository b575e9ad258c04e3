//! Name canonicalization and fuzzy scoring shared by every partition.

pub mod normalize;
pub mod scorer;

pub use normalize::{clean_file_name, has_lossy_characters, normalize};
pub use scorer::score;
