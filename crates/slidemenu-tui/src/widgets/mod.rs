mod message_list;
mod popup;
mod status_bar;

pub use message_list::MessageListWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
