pub mod block_matrix;
pub mod blocking;
pub mod gate;
pub mod layer;
pub mod rod;
pub mod stack;
pub mod truth_table;
pub mod util;
