//! Speaker directory adapters.

mod in_memory;
mod yaml_file;

pub use in_memory::InMemorySpeakerDirectory;
pub use yaml_file::YamlSpeakerDirectory;
