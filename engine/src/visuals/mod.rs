//! Visual entities drawn by layers.

mod rounded_rectangle;
mod route;
mod text;

pub use rounded_rectangle::RoundedRectangle;
pub use route::Route;
pub use text::Text;
