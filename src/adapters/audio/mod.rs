//! Audio adapters.

mod in_memory_music;

pub use in_memory_music::InMemoryMusicOutput;
