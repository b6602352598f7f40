pub mod integrity;
pub mod writer;

pub use integrity::{compute_hash, to_canonical_json};
pub use writer::{read_receipt, render_text, write_receipt, WriteReport};
