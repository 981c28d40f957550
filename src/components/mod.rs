//! Concrete leaf widgets built on the [`Widget`](crate::widget::Widget)
//! trait.

pub mod button;
pub mod label;

pub use button::Button;
pub use label::Label;
