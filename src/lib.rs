#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, EdgeStyle, LayoutConfig, LineCap, Settings, load_config, parse_config};
pub use ir::{Direction, Gender, PersonRecord, RecordInput, parse_records};
pub use layout::{Layout, LayoutWarning, compute_layout};
pub use layout_dump::{LayoutDump, write_layout_dump};
pub use theme::{GenderColors, Palette};
