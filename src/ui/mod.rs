pub mod recommend;
pub mod theme;
pub mod widgets;

pub use recommend::render_recommend_view;
pub use theme::Theme;
