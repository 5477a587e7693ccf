pub mod board;
pub mod screen;
pub mod style;
pub mod view;

pub use style::Palette;
pub use view::TerminalView;
