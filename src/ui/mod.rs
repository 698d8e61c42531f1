pub mod comparison;
pub mod editor;
pub mod title_bar;
pub mod viewport;
