pub mod category;
pub mod entry;
pub mod filter;
pub mod generation;
pub mod sprite;
pub mod view;

pub use category::Category;
pub use entry::{EntityRecord, Entry, MoveRecord, MoveRef, SpriteSet, id_from_url};
pub use filter::{CaughtFilter, FilterState, GenerationSelection, SearchMode, SearchState, SortState};
pub use generation::{GENERATIONS, Generation, generation_number, generation_of};
pub use sprite::{SpriteVariant, sprite_url};
pub use view::{NumberQuery, View, derive_view};
